//! Capacity-bounded archive.

use super::{
    Archive, ArchiveConfig, CrowdingEviction, EvictionPolicy, HypervolumeEviction, Members,
    ReferencePoint,
};
use crate::error::Result;
use crate::solution::Solution;

/// Non-dominated archive holding at most `capacity` members.
///
/// After a successful admission that leaves the archive over capacity,
/// exactly one member chosen by the [`EvictionPolicy`] is removed. The
/// newcomer itself can be that member; `add` still reports it as admitted.
///
/// # Examples
///
/// ```
/// use u_moea::archive::{Archive, HypervolumeArchive, ReferencePoint};
/// use u_moea::solution::Solution;
///
/// let mut archive = HypervolumeArchive::hypervolume(2, ReferencePoint::Fixed(vec![1.0, 1.0])).unwrap();
/// archive.add(Solution::from_objectives(vec![0.1, 0.9]));
/// archive.add(Solution::from_objectives(vec![0.9, 0.1]));
/// archive.add(Solution::from_objectives(vec![0.5, 0.5]));
///
/// assert_eq!(archive.size(), 2);
/// assert!(archive.iter().all(|s| s.objectives != vec![0.5, 0.5]));
/// ```
#[derive(Debug, Clone)]
pub struct BoundedArchive<V, P> {
    config: ArchiveConfig,
    policy: P,
    members: Members<V>,
}

/// Bounded archive pruned by crowding distance (SMPSO, MOCell, AbYSS).
pub type CrowdingDistanceArchive<V> = BoundedArchive<V, CrowdingEviction>;

/// Bounded archive pruned by exclusive hypervolume contribution.
pub type HypervolumeArchive<V> = BoundedArchive<V, HypervolumeEviction>;

impl<V, P: EvictionPolicy> BoundedArchive<V, P> {
    /// Creates an empty archive.
    ///
    /// Returns [`MoeaError::InvalidCapacity`](crate::MoeaError::InvalidCapacity)
    /// for a zero capacity, or the policy's own validation error.
    pub fn new(config: ArchiveConfig, policy: P) -> Result<Self> {
        config.validate()?;
        policy.validate()?;
        Ok(Self {
            config,
            policy,
            members: Members::new(config.duplicates),
        })
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Like [`Archive::add`], but reports a malformed candidate as an error.
    pub fn try_add(&mut self, solution: Solution<V>) -> Result<bool> {
        self.members.check(&solution)?;
        self.policy.accepts(&solution)?;
        if !self.members.admit(solution) {
            return Ok(false);
        }

        if self.members.solutions.len() > self.config.capacity {
            let victim = self.policy.select_victim(&mut self.members.solutions);
            let newest = self.members.solutions.len() - 1;
            tracing::trace!(
                victim,
                newcomer = victim == newest,
                capacity = self.config.capacity,
                "archive over capacity, evicting"
            );
            self.members.solutions.remove(victim);
        }

        debug_assert!(
            self.members.solutions.len() <= self.config.capacity,
            "archive exceeds its capacity"
        );
        Ok(true)
    }
}

impl<V> BoundedArchive<V, CrowdingEviction> {
    /// Crowding-distance archive with default duplicate handling.
    pub fn crowding(capacity: usize) -> Result<Self> {
        Self::new(ArchiveConfig::new(capacity), CrowdingEviction)
    }
}

impl<V> BoundedArchive<V, HypervolumeEviction> {
    /// Hypervolume archive with the default reference offset.
    pub fn hypervolume(capacity: usize, reference: ReferencePoint) -> Result<Self> {
        Self::new(
            ArchiveConfig::new(capacity),
            HypervolumeEviction::new(reference),
        )
    }
}

impl<V, P: EvictionPolicy> Archive<V> for BoundedArchive<V, P> {
    fn add(&mut self, solution: Solution<V>) -> bool {
        self.try_add(solution).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "candidate rejected by archive");
            false
        })
    }

    fn solutions(&self) -> &[Solution<V>] {
        &self.members.solutions
    }

    fn into_solutions(self) -> Vec<Solution<V>> {
        self.members.solutions
    }
}

// ============================================================================
// Tests
// ============================================================================
