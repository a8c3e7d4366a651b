//! Eviction policies for bounded archives.

use crate::density::{CrowdingDistance, DensityEstimator};
use crate::error::{MoeaError, Result};
use crate::hypervolume::{argmin, contributions_of, FrontNormalizer};
use crate::solution::Solution;

/// Chooses which member leaves a full archive.
pub trait EvictionPolicy {
    /// Index of the member to evict. `members` holds at least two solutions,
    /// all mutually non-dominated, oldest first.
    ///
    /// Policies may write their scores into the members' attributes.
    fn select_victim<V>(&self, members: &mut [Solution<V>]) -> usize;

    /// Validates the policy's parameters.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Checks that the policy can score `candidate`.
    fn accepts<V>(&self, _candidate: &Solution<V>) -> Result<()> {
        Ok(())
    }
}

/// Evicts the member with the smallest crowding distance.
///
/// Crowding is computed over the whole archive; ties go to the oldest
/// member.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowdingEviction;

impl EvictionPolicy for CrowdingEviction {
    fn select_victim<V>(&self, members: &mut [Solution<V>]) -> usize {
        let all: Vec<usize> = (0..members.len()).collect();
        CrowdingDistance.compute(members, &all);

        let distances: Vec<f64> = members
            .iter()
            .map(|s| s.attributes.crowding_distance)
            .collect();
        argmin(&distances).unwrap_or(0)
    }
}

/// Reference point used by [`HypervolumeEviction`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferencePoint {
    /// A fixed point, one coordinate per objective.
    Fixed(Vec<f64>),
    /// The per-objective maximum over the current members.
    Nadir,
}

/// Evicts the member with the smallest exclusive hypervolume contribution.
///
/// The reference point is shifted outward by `offset` in every objective
/// before measuring, so that members on the boundary of the reference box
/// still own some volume. With `offset = 0` and [`ReferencePoint::Nadir`],
/// the extreme members contribute nothing and are evicted first.
///
/// A nadir reference is taken in normalized space: members are scaled to
/// `[0, 1]` per objective and the reference is `1 + offset`. A fixed
/// reference is used in raw objective units.
///
/// Contributions are written into `attributes.hypervolume_contribution`,
/// in the space they were measured in. Ties go to the oldest member.
///
/// # Examples
///
/// ```
/// use u_moea::archive::{HypervolumeEviction, ReferencePoint};
///
/// let policy = HypervolumeEviction::default()
///     .with_reference(ReferencePoint::Fixed(vec![1.0, 1.0]))
///     .with_offset(0.5);
/// assert_eq!(policy.offset(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HypervolumeEviction {
    reference: ReferencePoint,
    offset: f64,
}

impl Default for HypervolumeEviction {
    fn default() -> Self {
        Self {
            reference: ReferencePoint::Nadir,
            offset: 1.0,
        }
    }
}

impl HypervolumeEviction {
    pub fn new(reference: ReferencePoint) -> Self {
        Self {
            reference,
            ..Self::default()
        }
    }

    pub fn with_reference(mut self, reference: ReferencePoint) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn reference(&self) -> &ReferencePoint {
        &self.reference
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Objective vectors and shifted reference point used to score
    /// `members`.
    ///
    /// With [`ReferencePoint::Nadir`] the members are min-max normalized
    /// over the archive first, so the offset is relative to the archive's
    /// extent and the choice does not depend on objective scale.
    fn scoring_space<V>(&self, members: &[Solution<V>]) -> (Vec<Vec<f64>>, Vec<f64>) {
        let objectives: Vec<Vec<f64>> = members.iter().map(|s| s.objectives.clone()).collect();
        match &self.reference {
            ReferencePoint::Fixed(point) => {
                let reference = point.iter().map(|r| r + self.offset).collect();
                (objectives, reference)
            }
            ReferencePoint::Nadir => {
                let normalized = FrontNormalizer::from_front(&objectives)
                    .and_then(|n| n.normalize(&objectives));
                match normalized {
                    Ok(normalized) => {
                        let m = normalized.first().map_or(0, Vec::len);
                        (normalized, vec![1.0 + self.offset; m])
                    }
                    Err(e) => {
                        // Unbounded objectives: fall back to the raw nadir.
                        tracing::trace!(error = %e, "archive not normalizable, using raw nadir");
                        let reference = raw_nadir(&objectives)
                            .into_iter()
                            .map(|r| r + self.offset)
                            .collect();
                        (objectives, reference)
                    }
                }
            }
        }
    }
}

fn raw_nadir(objectives: &[Vec<f64>]) -> Vec<f64> {
    let m = objectives.first().map_or(0, Vec::len);
    let mut nadir = vec![f64::NEG_INFINITY; m];
    for o in objectives {
        for (n, &v) in nadir.iter_mut().zip(o) {
            *n = n.max(v);
        }
    }
    nadir
}

impl EvictionPolicy for HypervolumeEviction {
    fn select_victim<V>(&self, members: &mut [Solution<V>]) -> usize {
        let (objectives, reference) = self.scoring_space(members);
        debug_assert!(
            objectives.iter().all(|o| o.len() == reference.len()),
            "reference point and members differ in objective count"
        );

        let points: Vec<&[f64]> = objectives.iter().map(Vec::as_slice).collect();
        let contributions = contributions_of(&points, &reference);

        for (s, &c) in members.iter_mut().zip(&contributions) {
            s.attributes.hypervolume_contribution = c;
        }
        argmin(&contributions).unwrap_or(0)
    }

    fn validate(&self) -> Result<()> {
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(MoeaError::invalid_config(format!(
                "HypervolumeEviction: offset must be finite and non-negative, got {}",
                self.offset
            )));
        }
        if let ReferencePoint::Fixed(point) = &self.reference {
            if point.is_empty() || point.iter().any(|v| !v.is_finite()) {
                return Err(MoeaError::InvalidReferencePoint);
            }
        }
        Ok(())
    }

    fn accepts<V>(&self, candidate: &Solution<V>) -> Result<()> {
        match &self.reference {
            ReferencePoint::Fixed(point) if point.len() != candidate.objectives.len() => {
                Err(MoeaError::ReferencePointMismatch {
                    expected: point.len(),
                    found: candidate.objectives.len(),
                })
            }
            _ => Ok(()),
        }
    }
}
