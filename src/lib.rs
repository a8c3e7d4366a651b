//! Pareto ranking, density estimation, and archiving kernel for
//! multi-objective metaheuristics.
//!
//! Provides the engineering core shared by population-based
//! multi-objective algorithms (NSGA-II, SPEA2, SMPSO, MOCell, ...):
//!
//! - **Dominance**: Pareto dominance with constraint-violation precedence.
//! - **Ranking**: Fast non-dominated sorting and SPEA2 strength ranking.
//! - **Density**: Crowding distance and k-th nearest neighbour distance.
//! - **Hypervolume**: Exact hypervolume and exclusive contributions, usable
//!   as a quality indicator and as an archive eviction criterion.
//! - **Archives**: Unbounded and capacity-bounded non-dominated archives
//!   pruned by crowding distance or hypervolume contribution.
//! - **Replacement**: Survivor selection composing a ranking with a density
//!   estimator, plus crowded-tournament mating selection.
//! - **NSGA-II**: A generational loop parameterized by the replacement
//!   strategy, with steady-state as a configuration.
//!
//! All objectives are **minimized**. Randomized operations take an explicit
//! `&mut R: Rng`; nothing in the crate reads global random state except an
//! unseeded [`nsga2::Nsga2Runner`] run.
//!
//! # Example
//!
//! ```
//! use u_moea::density::{CrowdingDistance, DensityEstimator};
//! use u_moea::ranking::{FastNonDominatedSort, Ranking};
//! use u_moea::solution::Solution;
//!
//! let mut pop: Vec<_> = [[1.0, 5.0], [2.0, 3.0], [3.0, 2.0], [4.0, 4.0], [5.0, 1.0]]
//!     .iter()
//!     .map(|o| Solution::from_objectives(o.to_vec()))
//!     .collect();
//!
//! let fronts = FastNonDominatedSort::default().compute(&mut pop).unwrap();
//! CrowdingDistance.compute(&mut pop, fronts.front(0));
//!
//! assert_eq!(fronts.front(1), &[3]);
//! assert!(pop[0].attributes.crowding_distance.is_infinite());
//! ```

pub mod archive;
pub mod density;
pub mod dominance;
pub mod error;
pub mod hypervolume;
pub mod nsga2;
pub mod random;
pub mod ranking;
pub mod replacement;
pub mod solution;

pub use error::{MoeaError, Result};
