//! Parent selection for the NSGA-II loop.

use crate::solution::Solution;
use rand::Rng;
use std::cmp::Ordering;

/// Strategy for choosing parents from a ranked population.
///
/// # Examples
///
/// ```
/// use u_moea::replacement::MatingSelection;
///
/// // Binary tournament (the NSGA-II default)
/// let sel = MatingSelection::default();
/// assert_eq!(sel, MatingSelection::Tournament(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatingSelection {
    /// Pick `k` solutions at random and keep the best: lower rank, then
    /// larger density score (crowding distance unless another score is
    /// supplied through [`MatingSelection::select_by`]).
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Uniform random choice, ignoring rank and density.
    Random,
}

impl Default for MatingSelection {
    fn default() -> Self {
        MatingSelection::Tournament(2)
    }
}

impl MatingSelection {
    /// Selects a parent index from the population, breaking rank ties by
    /// crowding distance.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<V, R: Rng>(&self, population: &[Solution<V>], rng: &mut R) -> usize {
        self.select_by(population, rng, |s| s.attributes.crowding_distance)
    }

    /// Like [`select`](Self::select), with rank ties broken by `density`
    /// (larger wins).
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select_by<V, R, F>(&self, population: &[Solution<V>], rng: &mut R, density: F) -> usize
    where
        R: Rng,
        F: Fn(&Solution<V>) -> f64,
    {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            MatingSelection::Tournament(k) => tournament(population, *k, rng, &density),
            MatingSelection::Random => rng.random_range(0..population.len()),
        }
    }
}

/// Tournament on rank, then density; the first drawn wins ties.
fn tournament<V, R, F>(population: &[Solution<V>], k: usize, rng: &mut R, density: &F) -> usize
where
    R: Rng,
    F: Fn(&Solution<V>) -> f64,
{
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        let (a, b) = (&population[idx], &population[best_idx]);
        let better = a.rank_or_max().cmp(&b.rank_or_max()).then_with(|| {
            density(b)
                .partial_cmp(&density(a))
                .unwrap_or(Ordering::Equal)
        });
        if better == Ordering::Less {
            best_idx = idx;
        }
    }
    best_idx
}
