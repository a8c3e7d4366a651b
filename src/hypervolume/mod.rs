//! Hypervolume indicator.
//!
//! The hypervolume of a front is the volume of objective space it
//! dominates, bounded by a reference point. All objectives are minimized
//! and are expected to be normalized to `[0, 1]` by the caller when the
//! result is reported as a quality indicator.
//!
//! The same engine drives the eviction rule of
//! [`HypervolumeArchive`](crate::archive::HypervolumeArchive), which needs
//! each member's exclusive contribution.
//!
//! # Key Types
//!
//! - [`Hypervolume`]: Volume and exclusive contributions for a reference point
//! - [`FrontNormalizer`]: Maps a front into `[0, 1]` per objective
//!
//! # References
//!
//! - While, Bradstreet & Barone (2012), "A Fast Way of Calculating Exact
//!   Hypervolumes" (WFG)
//! - While, Hingston, Barone & Huband (2006), "A faster algorithm for
//!   calculating hypervolume" (HSO slicing)
//! - Zitzler & Thiele (1999), "Multiobjective evolutionary algorithms: a
//!   comparative case study and the strength Pareto approach"

mod engine;
mod normalize;

pub use engine::Hypervolume;
pub use normalize::FrontNormalizer;

pub(crate) use engine::{argmin, contributions_of};
