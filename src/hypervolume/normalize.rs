use crate::error::{MoeaError, Result};

/// Min-max normalization of objective vectors.
///
/// Maps each objective to `[0, 1]` using bounds taken from a reference front
/// (or given explicitly). Objectives whose range is zero map to 0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrontNormalizer {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl FrontNormalizer {
    /// Bounds from the per-objective extremes of `front`.
    pub fn from_front(front: &[Vec<f64>]) -> Result<Self> {
        let first = front.first().ok_or(MoeaError::EmptyPopulation)?;
        let m = first.len();
        if m == 0 {
            return Err(MoeaError::EmptyObjectives { index: 0 });
        }

        let mut min = vec![f64::INFINITY; m];
        let mut max = vec![f64::NEG_INFINITY; m];
        for (index, point) in front.iter().enumerate() {
            if point.len() != m {
                return Err(MoeaError::ObjectiveCountMismatch {
                    index,
                    expected: m,
                    found: point.len(),
                });
            }
            if point.iter().any(|v| !v.is_finite()) {
                return Err(MoeaError::NonFiniteValue { index });
            }
            for k in 0..m {
                min[k] = min[k].min(point[k]);
                max[k] = max[k].max(point[k]);
            }
        }
        Ok(Self { min, max })
    }

    /// Explicit bounds.
    pub fn from_bounds(min: Vec<f64>, max: Vec<f64>) -> Result<Self> {
        if min.len() != max.len() {
            return Err(MoeaError::ObjectiveCountMismatch {
                index: 0,
                expected: min.len(),
                found: max.len(),
            });
        }
        if min.iter().chain(&max).any(|v| !v.is_finite()) {
            return Err(MoeaError::NonFiniteValue { index: 0 });
        }
        if min.iter().zip(&max).any(|(lo, hi)| lo > hi) {
            return Err(MoeaError::invalid_config(
                "FrontNormalizer: min bound exceeds max bound",
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Normalizes one point.
    pub fn normalize_point(&self, point: &[f64]) -> Result<Vec<f64>> {
        if point.len() != self.min.len() {
            return Err(MoeaError::ObjectiveCountMismatch {
                index: 0,
                expected: self.min.len(),
                found: point.len(),
            });
        }
        Ok(point
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .map(|(&v, (&lo, &hi))| {
                let range = hi - lo;
                if range > 0.0 {
                    (v - lo) / range
                } else {
                    0.0
                }
            })
            .collect())
    }

    /// Normalizes every point of `front`.
    pub fn normalize(&self, front: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        front
            .iter()
            .enumerate()
            .map(|(index, p)| {
                self.normalize_point(p).map_err(|e| match e {
                    MoeaError::ObjectiveCountMismatch {
                        expected, found, ..
                    } => MoeaError::ObjectiveCountMismatch {
                        index,
                        expected,
                        found,
                    },
                    other => other,
                })
            })
            .collect()
    }
}
