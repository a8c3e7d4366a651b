//! Density estimation within a front.
//!
//! A [`DensityEstimator`] scores how isolated each member of a front is.
//! Higher scores mean more valuable for diversity; they are used as the
//! secondary sort key after rank when a population is truncated.
//!
//! # Implementations
//!
//! - [`CrowdingDistance`]: NSGA-II crowding distance
//! - [`KnnDistance`]: SPEA2 distance to the k-th nearest neighbour
//!
//! # Functions
//!
//! - [`crowding_distance`]: Crowding distance on raw objective vectors
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Zitzler, Laumanns & Thiele (2001), "SPEA2"

mod crowding;
mod knn;

pub use crowding::{crowding_distance, CrowdingDistance};
pub use knn::KnnDistance;

use crate::solution::Solution;
use std::cmp::Ordering;

/// Assigns a diversity score to each member of a front.
pub trait DensityEstimator {
    /// Computes and stores the score of every solution listed in `front`.
    ///
    /// `front` holds indices into `population`. Solutions outside `front`
    /// are not touched.
    fn compute<V>(&self, population: &mut [Solution<V>], front: &[usize]);

    /// Reads the score stored by [`compute`](Self::compute).
    fn density<V>(&self, solution: &Solution<V>) -> f64;

    /// Sorts `front` by descending score (most isolated first).
    ///
    /// The sort is stable: equal scores keep their relative order.
    fn sort_by_density<V>(&self, population: &[Solution<V>], front: &mut [usize]) {
        front.sort_by(|&a, &b| {
            self.density(&population[b])
                .partial_cmp(&self.density(&population[a]))
                .unwrap_or(Ordering::Equal)
        });
    }
}
