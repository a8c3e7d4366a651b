//! Pareto dominance with constraint-violation precedence.
//!
//! Every other component (ranking, archives, hypervolume filtering) decides
//! "better" through this module, so the feasibility rules live in exactly
//! one place.
//!
//! # Key Types
//!
//! - [`DominanceComparator`]: Pairwise comparison returning an [`Ordering`](std::cmp::Ordering)
//!
//! # Functions
//!
//! - [`pareto_dominance`]: Dominance on raw objective vectors
//! - [`constraint_violation_cmp`]: Lower violation first
//! - [`equal_objectives`]: Identical objective vectors
//! - [`crowded_comparison`]: NSGA-II crowded comparison (rank, then crowding)
//!
//! # References
//!
//! - Deb (2000), "An efficient constraint handling method for genetic algorithms"
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective GA: NSGA-II"

mod comparator;

pub use comparator::{
    constraint_violation_cmp, crowded_comparison, equal_objectives, pareto_dominance,
    DominanceComparator,
};
