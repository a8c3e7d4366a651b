//! NSGA-II evolutionary loop execution.
//!
//! [`Nsga2Runner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → mating → variation → replacement → repeat.

use super::config::Nsga2Config;
use super::types::MoProblem;
use crate::archive::{Archive, CrowdingDistanceArchive};
use crate::density::CrowdingDistance;
use crate::error::Result;
use crate::random::create_rng;
use crate::ranking::FastNonDominatedSort;
use crate::replacement::{RankingAndDensityReplacement, Replacement};
use crate::solution::{validate_population, Solution};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of an NSGA-II run.
#[derive(Debug, Clone)]
pub struct Nsga2Result<V> {
    /// Final population, in front order.
    pub population: Vec<Solution<V>>,

    /// Rank-0 members of the final population.
    pub pareto_front: Vec<Solution<V>>,

    /// Contents of the internal archive, empty unless
    /// [`Nsga2Config::archive_capacity`] is set.
    pub archive: Vec<Solution<V>>,

    /// Number of generations executed.
    pub generations: usize,

    /// Number of problem evaluations, including the initial population.
    pub evaluations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Size of the first front after initialization and after each
    /// generation.
    pub front_sizes: Vec<usize>,
}

/// Executes the NSGA-II loop with an injected [`Replacement`] strategy.
///
/// The default runner uses fast non-dominated sorting with crowding
/// distance; other variants (for example SPEA2-style truncation) are other
/// replacement strategies, not other runners.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = Nsga2Config::default().with_seed(42);
/// let result = Nsga2Runner::nsga2().run(&problem, &config)?;
/// println!("Front size: {}", result.pareto_front.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Nsga2Runner<R = RankingAndDensityReplacement<FastNonDominatedSort, CrowdingDistance>> {
    replacement: R,
}

impl Nsga2Runner {
    /// Runner with fast non-dominated sorting and crowding distance.
    pub fn nsga2() -> Self {
        Self::new(RankingAndDensityReplacement::nsga2())
    }
}

impl<R: Replacement> Nsga2Runner<R> {
    /// Creates a runner around `replacement`.
    pub fn new(replacement: R) -> Self {
        Self { replacement }
    }

    pub fn replacement(&self) -> &R {
        &self.replacement
    }

    /// Runs the optimization.
    pub fn run<P: MoProblem>(
        &self,
        problem: &P,
        config: &Nsga2Config,
    ) -> Result<Nsga2Result<P::Variable>> {
        self.run_with(problem, config, None, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the current population.
    pub fn run_with_cancel<P: MoProblem>(
        &self,
        problem: &P,
        config: &Nsga2Config,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Nsga2Result<P::Variable>> {
        self.run_with(problem, config, None, cancel)
    }

    /// Runs with an optional external archive and cancellation token.
    ///
    /// Every evaluated solution is offered to `archive`. When `archive` is
    /// `Some`, the internal archive of [`Nsga2Config::archive_capacity`] is
    /// not created.
    pub fn run_with<P: MoProblem>(
        &self,
        problem: &P,
        config: &Nsga2Config,
        archive: Option<&mut dyn Archive<P::Variable>>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Nsga2Result<P::Variable>> {
        config.validate()?;
        let m = problem.number_of_objectives();
        let start = Instant::now();

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut archive = archive;
        let mut internal = match (&archive, config.archive_capacity) {
            (None, Some(capacity)) => Some(CrowdingDistanceArchive::crowding(capacity)?),
            _ => None,
        };

        // 1. Initialize and evaluate
        let mut population: Vec<Solution<P::Variable>> = (0..config.population_size)
            .map(|_| Solution::new(problem.create_variables(&mut rng), Vec::new()))
            .collect();
        evaluate_batch(problem, &mut population, config.parallel);
        validate_population(&population, Some(m))?;
        let mut evaluations = population.len();
        offer(&mut archive, &mut internal, &population);

        // 2. Rank and compute densities for the first mating round
        population = self.replacement.replace(population, Vec::new())?;
        let mut front_sizes = vec![first_front_size(&population)];

        let mut generations = 0usize;
        let mut cancelled = false;

        // 3. Evolutionary loop
        for generation in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    tracing::warn!(generation, "run cancelled");
                    break;
                }
            }
            if let Some(ms) = config.time_limit_ms {
                if start.elapsed().as_millis() >= u128::from(ms) {
                    tracing::debug!(generation, "time limit reached");
                    break;
                }
            }

            let batch = match config.max_evaluations {
                Some(budget) => config
                    .offspring_population_size
                    .min(budget.saturating_sub(evaluations)),
                None => config.offspring_population_size,
            };
            if batch == 0 {
                break;
            }

            // Mating and variation
            let mut offspring: Vec<Solution<P::Variable>> = Vec::with_capacity(batch);
            while offspring.len() < batch {
                let density = |s: &Solution<P::Variable>| self.replacement.density(s);
                let p1 = config.selection.select_by(&population, &mut rng, density);
                let p2 = config.selection.select_by(&population, &mut rng, density);

                let mut children = if rng.random_bool(config.crossover_rate) {
                    problem.crossover(
                        &population[p1].variables,
                        &population[p2].variables,
                        &mut rng,
                    )
                } else {
                    Vec::new()
                };
                if children.is_empty() {
                    children.push(population[p1].variables.clone());
                }

                for mut child in children {
                    if offspring.len() >= batch {
                        break;
                    }
                    if rng.random_bool(config.mutation_rate) {
                        problem.mutate(&mut child, &mut rng);
                    }
                    offspring.push(Solution::new(child, Vec::new()));
                }
            }

            // Evaluation barrier: the whole batch is evaluated before ranking.
            evaluate_batch(problem, &mut offspring, config.parallel);
            validate_population(&offspring, Some(m))?;
            evaluations += offspring.len();
            offer(&mut archive, &mut internal, &offspring);

            population = self.replacement.replace(population, offspring)?;
            generations = generation + 1;

            let front = first_front_size(&population);
            front_sizes.push(front);
            tracing::debug!(generation = generations, evaluations, front, "generation done");

            problem.on_generation(generations, &population);
        }

        let pareto_front = population
            .iter()
            .filter(|s| s.attributes.rank == Some(0))
            .cloned()
            .collect();

        Ok(Nsga2Result {
            population,
            pareto_front,
            archive: internal.map(|a| a.into_solutions()).unwrap_or_default(),
            generations,
            evaluations,
            cancelled,
            front_sizes,
        })
    }
}

/// Evaluates every solution of `batch` in place.
fn evaluate_batch<P: MoProblem>(problem: &P, batch: &mut [Solution<P::Variable>], parallel: bool) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if parallel {
            batch.par_iter_mut().for_each(|s| apply_evaluation(problem, s));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for s in batch.iter_mut() {
        apply_evaluation(problem, s);
    }
}

fn apply_evaluation<P: MoProblem>(problem: &P, solution: &mut Solution<P::Variable>) {
    let evaluation = problem.evaluate(&solution.variables);
    solution.objectives = evaluation.objectives;
    solution.constraint_violation = evaluation.constraint_violation;
}

/// Offers clones of `batch` to the external archive, or else the internal one.
fn offer<V: Clone>(
    external: &mut Option<&mut dyn Archive<V>>,
    internal: &mut Option<CrowdingDistanceArchive<V>>,
    batch: &[Solution<V>],
) {
    if let Some(archive) = external.as_deref_mut() {
        for s in batch {
            archive.add(s.clone());
        }
    } else if let Some(archive) = internal.as_mut() {
        for s in batch {
            archive.add(s.clone());
        }
    }
}

fn first_front_size<V>(population: &[Solution<V>]) -> usize {
    population
        .iter()
        .filter(|s| s.attributes.rank == Some(0))
        .count()
}

// ============================================================================
// Tests
// ============================================================================
