//! Error type shared by every component of the crate.
//!
//! Only configuration errors surface here. Numerical edge cases (zero-range
//! objectives, duplicate hypervolume slabs) are absorbed by the algorithms
//! with documented fallbacks, and broken invariants are `debug_assert!`s.

/// Errors reported at the call boundary before any ranking work starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MoeaError {
    #[error("InvalidCapacity: archive capacity must be at least 1, got {capacity}")]
    InvalidCapacity { capacity: usize },

    #[error("EmptyPopulation: at least one solution is required")]
    EmptyPopulation,

    #[error("EmptyObjectives: solution {index} has no objective values")]
    EmptyObjectives { index: usize },

    #[error(
        "ObjectiveCountMismatch: solution {index} has {found} objectives, expected {expected}"
    )]
    ObjectiveCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("NonFiniteValue: solution {index} has a NaN objective or constraint violation")]
    NonFiniteValue { index: usize },

    #[error("ReferencePointMismatch: reference point has {expected} objectives, point has {found}")]
    ReferencePointMismatch { expected: usize, found: usize },

    #[error("InvalidReferencePoint: reference point must be non-empty and finite")]
    InvalidReferencePoint,

    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
}

impl MoeaError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MoeaError>;
