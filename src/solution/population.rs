//! Population-level checks performed at the call boundary.

use super::types::Solution;
use crate::error::{MoeaError, Result};

/// Validates that a population can be ranked.
///
/// Checks, in order, for every solution:
/// 1. the objective vector is non-empty,
/// 2. it has `expected` objectives (or the first solution's count when
///    `expected` is `None`),
/// 3. no objective and no constraint violation is NaN.
///
/// An empty population is valid here; callers that need at least one
/// solution check for that themselves.
///
/// Returns the number of objectives (0 for an empty population).
///
/// # Examples
///
/// ```
/// use u_moea::solution::{validate_population, Solution};
///
/// let pop = vec![
///     Solution::from_objectives(vec![1.0, 2.0]),
///     Solution::from_objectives(vec![2.0, 1.0]),
/// ];
/// assert_eq!(validate_population(&pop, None), Ok(2));
///
/// let bad = vec![
///     Solution::from_objectives(vec![1.0, 2.0]),
///     Solution::from_objectives(vec![2.0]),
/// ];
/// assert!(validate_population(&bad, None).is_err());
/// ```
pub fn validate_population<V>(population: &[Solution<V>], expected: Option<usize>) -> Result<usize> {
    let Some(first) = population.first() else {
        return Ok(expected.unwrap_or(0));
    };
    let m = expected.unwrap_or(first.objectives.len());

    for (index, s) in population.iter().enumerate() {
        if s.objectives.is_empty() {
            return Err(MoeaError::EmptyObjectives { index });
        }
        if s.objectives.len() != m {
            return Err(MoeaError::ObjectiveCountMismatch {
                index,
                expected: m,
                found: s.objectives.len(),
            });
        }
        if s.constraint_violation.is_nan() || s.objectives.iter().any(|v| v.is_nan()) {
            return Err(MoeaError::NonFiniteValue { index });
        }
    }

    Ok(m)
}

/// Copies the objective vectors of the selected members.
///
/// `indices` refer to positions in `population`.
pub fn objective_matrix<V>(population: &[Solution<V>], indices: &[usize]) -> Vec<Vec<f64>> {
    indices
        .iter()
        .map(|&i| population[i].objectives.clone())
        .collect()
}
