//! Dominance ranking.
//!
//! A [`Ranking`] partitions a population into ordered fronts: front 0 is
//! the non-dominated set, front 1 is non-dominated once front 0 is removed,
//! and so on. Fronts hold indices into the ranked population, so the
//! population itself is never reordered or aliased.
//!
//! # Implementations
//!
//! - [`FastNonDominatedSort`]: Deb et al. (2002), O(m·n²)
//! - [`StrengthRanking`]: SPEA2 raw fitness, grouped into fronts
//!
//! # Functions
//!
//! - [`non_dominated_sort`]: Fast non-dominated sort on raw objective vectors
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Zitzler, Laumanns & Thiele (2001), "SPEA2: Improving the Strength Pareto
//!   Evolutionary Algorithm"

mod fast_nds;
mod strength;

pub use fast_nds::{non_dominated_sort, FastNonDominatedSort};
pub use strength::StrengthRanking;

use crate::error::Result;
use crate::solution::Solution;

/// Result of ranking a population.
///
/// `ranks[i]` is the front index of solution `i`; `fronts[k]` lists the
/// indices of rank `k` in increasing index order. Every index of the ranked
/// population appears in exactly one front.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fronts {
    /// Front index for each solution (0 = non-dominated).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

impl Fronts {
    /// Number of fronts.
    pub fn number_of_fronts(&self) -> usize {
        self.fronts.len()
    }

    /// Indices of front `k`, or an empty slice if there is no such front.
    pub fn front(&self, k: usize) -> &[usize] {
        self.fronts.get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether no solution was ranked.
    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }

    /// Iterates fronts from rank 0 upward.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.fronts.iter().map(Vec::as_slice)
    }
}

/// Partitions a population into dominance fronts.
///
/// Implementations must write each solution's front index into
/// `attributes.rank` and return a [`Fronts`] whose union is exactly the
/// input index set. The population is not reordered.
pub trait Ranking {
    /// Ranks `population` and returns its fronts.
    ///
    /// An empty population yields empty [`Fronts`]. Mismatched objective
    /// counts or NaN values are reported as errors before any comparison.
    fn compute<V>(&self, population: &mut [Solution<V>]) -> Result<Fronts>;
}
