//! Archive configuration.

use crate::error::{MoeaError, Result};

/// What to do with a candidate whose objective vector is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicatePolicy {
    /// Reject the candidate.
    #[default]
    Reject,
    /// Keep both; duplicates never dominate each other.
    Allow,
}

/// Configuration of a [`BoundedArchive`](super::BoundedArchive).
///
/// # Examples
///
/// ```
/// use u_moea::archive::{ArchiveConfig, DuplicatePolicy};
///
/// let config = ArchiveConfig::new(100).with_duplicates(DuplicatePolicy::Allow);
/// assert!(config.validate().is_ok());
/// assert!(ArchiveConfig::new(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveConfig {
    /// Maximum number of members (at least 1).
    pub capacity: usize,

    /// Handling of identical objective vectors.
    pub duplicates: DuplicatePolicy,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

impl ArchiveConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(MoeaError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
