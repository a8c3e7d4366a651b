//! Generational NSGA-II loop.
//!
//! A generic loop parameterized by an injected
//! [`Replacement`](crate::replacement::Replacement) strategy. Users define
//! their problem by implementing [`MoProblem`]; algorithm variants are
//! replacement strategies, not subclasses of the loop.
//!
//! # Core Traits
//!
//! - [`MoProblem`]: Problem definition (initialization, evaluation, operators)
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: Algorithm parameters (population sizes, selection, budgets)
//! - [`Nsga2Runner`]: Executes the evolutionary loop
//! - [`Nsga2Result`]: Final population, Pareto front, and run statistics
//!
//! Steady-state NSGA-II is the same loop with
//! [`Nsga2Config::steady_state`] (one offspring per generation).
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Durillo, Nebro, Luna & Alba (2009), "On the Effect of the Steady-State
//!   Selection Scheme in Multi-Objective Genetic Algorithms"

mod config;
mod runner;
mod types;

pub use config::Nsga2Config;
pub use runner::{Nsga2Result, Nsga2Runner};
pub use types::MoProblem;
