//! Archives of mutually non-dominated solutions.
//!
//! An archive keeps the best trade-offs seen during a run. Admission is the
//! same for every archive: a candidate dominated by a member is rejected,
//! members dominated by the candidate are removed. Bounded archives then
//! evict one member whenever the capacity is exceeded.
//!
//! # Key Types
//!
//! - [`Archive`]: Common interface used by the NSGA-II loop
//! - [`NonDominatedArchive`]: Unbounded
//! - [`BoundedArchive`]: Capacity-bounded, parameterized by an [`EvictionPolicy`]
//! - [`CrowdingDistanceArchive`]: Evicts the most crowded member
//! - [`HypervolumeArchive`]: Evicts the least hypervolume contributor
//!
//! # References
//!
//! - Knowles & Corne (2003), "Properties of an adaptive archiving algorithm
//!   for storing nondominated vectors"
//! - Nebro et al. (2008), "SMPSO" (crowding distance archive)

mod bounded;
mod config;
mod eviction;
mod non_dominated;

pub use bounded::{BoundedArchive, CrowdingDistanceArchive, HypervolumeArchive};
pub use config::{ArchiveConfig, DuplicatePolicy};
pub use eviction::{CrowdingEviction, EvictionPolicy, HypervolumeEviction, ReferencePoint};
pub use non_dominated::NonDominatedArchive;

use crate::dominance::{equal_objectives, DominanceComparator};
use crate::error::{MoeaError, Result};
use crate::solution::Solution;
use std::cmp::Ordering;

/// A container of mutually non-dominated solutions.
pub trait Archive<V> {
    /// Offers `solution` to the archive.
    ///
    /// Returns `true` if the candidate passed admission. A bounded archive
    /// may then evict it as the least valuable member; that is still an
    /// admission.
    fn add(&mut self, solution: Solution<V>) -> bool;

    /// Current members, oldest first.
    fn solutions(&self) -> &[Solution<V>];

    fn size(&self) -> usize {
        self.solutions().len()
    }

    fn is_empty(&self) -> bool {
        self.solutions().is_empty()
    }

    fn iter(&self) -> std::slice::Iter<'_, Solution<V>> {
        self.solutions().iter()
    }

    /// Consumes the archive and returns its members.
    fn into_solutions(self) -> Vec<Solution<V>>
    where
        Self: Sized;
}

/// Member list plus the admission rule shared by every archive.
#[derive(Debug, Clone)]
pub(crate) struct Members<V> {
    comparator: DominanceComparator,
    duplicates: DuplicatePolicy,
    pub(crate) solutions: Vec<Solution<V>>,
}

impl<V> Members<V> {
    pub(crate) fn new(duplicates: DuplicatePolicy) -> Self {
        Self {
            comparator: DominanceComparator::default(),
            duplicates,
            solutions: Vec::new(),
        }
    }

    /// Checks that `candidate` can be compared with the current members.
    ///
    /// Errors carry the index the candidate would be appended at.
    pub(crate) fn check(&self, candidate: &Solution<V>) -> Result<()> {
        let index = self.solutions.len();
        if candidate.objectives.is_empty() {
            return Err(MoeaError::EmptyObjectives { index });
        }
        if let Some(first) = self.solutions.first() {
            if first.objectives.len() != candidate.objectives.len() {
                return Err(MoeaError::ObjectiveCountMismatch {
                    index,
                    expected: first.objectives.len(),
                    found: candidate.objectives.len(),
                });
            }
        }
        if candidate.constraint_violation.is_nan() || candidate.objectives.iter().any(|v| v.is_nan())
        {
            return Err(MoeaError::NonFiniteValue { index });
        }
        Ok(())
    }

    /// Applies the dominance admission rule. Returns whether `candidate`
    /// was appended.
    pub(crate) fn admit(&mut self, candidate: Solution<V>) -> bool {
        let mut dominated = vec![false; self.solutions.len()];
        for (i, member) in self.solutions.iter().enumerate() {
            match self.comparator.compare(member, &candidate) {
                Ordering::Less => return false,
                Ordering::Greater => dominated[i] = true,
                Ordering::Equal => {
                    if self.duplicates == DuplicatePolicy::Reject
                        && equal_objectives(member, &candidate)
                    {
                        return false;
                    }
                }
            }
        }

        let mut flags = dominated.into_iter();
        self.solutions.retain(|_| !flags.next().unwrap_or(false));
        self.solutions.push(candidate);

        debug_assert!(
            self.mutually_non_dominated(),
            "archive members must not dominate each other"
        );
        true
    }

    fn mutually_non_dominated(&self) -> bool {
        self.solutions.iter().enumerate().all(|(i, a)| {
            self.solutions[i + 1..]
                .iter()
                .all(|b| self.comparator.compare(a, b) == Ordering::Equal)
        })
    }
}
