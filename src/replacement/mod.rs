//! Survivor and parent selection.
//!
//! A [`Replacement`] merges the current population with its offspring and
//! keeps the best solutions for the next generation. The NSGA-II family
//! does this by ranking the merged population into fronts and breaking the
//! last, partially fitting front by density.
//!
//! # Key Types
//!
//! - [`Replacement`]: Strategy injected into [`Nsga2Runner`](crate::nsga2::Nsga2Runner)
//! - [`RankingAndDensityReplacement`]: Any [`Ranking`](crate::ranking::Ranking)
//!   combined with any [`DensityEstimator`](crate::density::DensityEstimator)
//! - [`RemovalPolicy`]: Truncate the last front at once or one by one
//! - [`MatingSelection`]: Parent choice by crowded tournament or uniformly
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective GA: NSGA-II"
//! - Zitzler, Laumanns & Thiele (2001), "SPEA2" (sequential truncation)

mod ranking_density;
mod selection;

pub use ranking_density::{RankingAndDensityReplacement, RemovalPolicy};
pub use selection::MatingSelection;

use crate::error::Result;
use crate::solution::Solution;

/// Chooses the next generation from a population and its offspring.
pub trait Replacement {
    /// Returns the survivors, as many as `population` holds.
    ///
    /// Solutions are moved, not cloned. Errors are configuration problems
    /// of the inputs (mismatched objective counts, NaN values, or both
    /// lists empty).
    fn replace<V>(
        &self,
        population: Vec<Solution<V>>,
        offspring: Vec<Solution<V>>,
    ) -> Result<Vec<Solution<V>>>;

    /// Density score left on a survivor by [`replace`](Self::replace),
    /// larger meaning more isolated. Mating tournaments break rank ties
    /// with it.
    fn density<V>(&self, solution: &Solution<V>) -> f64 {
        solution.attributes.crowding_distance
    }
}
