//! Candidate solutions and populations.
//!
//! A [`Solution`] carries its decision vector, its objective vector, a
//! scalar constraint-violation degree, and the typed [`Attributes`] that
//! ranking, density estimation, and archives write back.
//!
//! # Key Types
//!
//! - [`Solution`]: A value-like candidate; cloning yields an independent copy
//! - [`Attributes`]: Rank, crowding distance, and other per-generation scores
//! - [`Evaluation`]: What a problem returns for one decision vector
//!
//! Populations are plain `Vec<Solution<V>>` owned by one generation. Fronts
//! and archives refer to them through indices or own their own clones.

mod population;
mod types;

pub use population::{objective_matrix, validate_population};
pub use types::{Attributes, Evaluation, Solution};
