//! Problem contract for the NSGA-II loop.

use crate::solution::{Evaluation, Solution};
use rand::Rng;

/// Defines a multi-objective optimization problem.
///
/// This is the trait users implement to plug a problem into
/// [`Nsga2Runner`](super::Nsga2Runner). It covers:
///
/// 1. **Initialization**: How to create a random decision vector
/// 2. **Evaluation**: Objectives (all minimized) and constraint violation
/// 3. **Crossover**: How to recombine two parents
/// 4. **Mutation**: How to perturb a decision vector
///
/// # Thread Safety
///
/// `MoProblem` must be `Send + Sync` because the runner may evaluate
/// offspring in parallel using rayon (`parallel` feature).
pub trait MoProblem: Send + Sync {
    /// Element type of a decision vector.
    type Variable: Clone + Send + Sync;

    /// Number of objectives every evaluation must return.
    fn number_of_objectives(&self) -> usize;

    /// Creates a random decision vector.
    fn create_variables<R: Rng>(&self, rng: &mut R) -> Vec<Self::Variable>;

    /// Evaluates a decision vector.
    ///
    /// This is typically the most expensive operation and may be called in
    /// parallel across a batch of offspring.
    fn evaluate(&self, variables: &[Self::Variable]) -> Evaluation;

    /// Produces one or more children from two parents.
    ///
    /// The default implementation clones `parent1` (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &[Self::Variable],
        _parent2: &[Self::Variable],
        _rng: &mut R,
    ) -> Vec<Vec<Self::Variable>> {
        vec![parent1.to_vec()]
    }

    /// Mutates a decision vector in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _variables: &mut Vec<Self::Variable>, _rng: &mut R) {}

    /// Called at the end of each generation with the surviving population,
    /// in front order.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _population: &[Solution<Self::Variable>]) {}
}
