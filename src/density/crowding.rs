//! Crowding distance.

use super::DensityEstimator;
use crate::solution::Solution;
use std::cmp::Ordering;

/// NSGA-II crowding distance estimator.
///
/// Writes into `attributes.crowding_distance`. See [`crowding_distance`] for
/// the algorithm and its edge cases.
///
/// # Example
///
/// ```
/// use u_moea::density::{CrowdingDistance, DensityEstimator};
/// use u_moea::solution::Solution;
///
/// let mut front: Vec<_> = [[0.0, 1.0], [0.5, 0.5], [1.0, 0.0]]
///     .iter()
///     .map(|o| Solution::from_objectives(o.to_vec()))
///     .collect();
///
/// CrowdingDistance.compute(&mut front, &[0, 1, 2]);
/// assert!(front[0].attributes.crowding_distance.is_infinite());
/// assert!((front[1].attributes.crowding_distance - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CrowdingDistance;

impl DensityEstimator for CrowdingDistance {
    fn compute<V>(&self, population: &mut [Solution<V>], front: &[usize]) {
        let m = front
            .first()
            .map_or(0, |&i| population[i].objectives.len());
        let distances = crowding_indexed(
            front.len(),
            |pos, obj| population[front[pos]].objectives[obj],
            m,
        );

        for (&i, d) in front.iter().zip(distances) {
            population[i].attributes.crowding_distance = d;
        }
    }

    fn density<V>(&self, solution: &Solution<V>) -> f64 {
        solution.attributes.crowding_distance
    }
}

/// Crowding distance of every point in a front of raw objective vectors.
///
/// A point's distance is the normalized perimeter of the cuboid spanned by
/// its two neighbours along each objective; larger means more isolated.
///
/// # Algorithm
///
/// Per objective, with points sorted ascending (stable):
/// - the first and last points get `f64::INFINITY`
/// - every other point adds `(next - prev) / (max - min)`
///
/// Fronts of one or two points are all boundary. An objective whose range
/// is zero (or non-finite) adds nothing.
///
/// # Complexity
///
/// O(m · n log n) for n points and m objectives.
///
/// # Example
///
/// ```
/// use u_moea::density::crowding_distance;
///
/// let front = vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]];
/// let cd = crowding_distance(&front);
///
/// assert_eq!(cd[0], f64::INFINITY);
/// assert_eq!(cd[2], f64::INFINITY);
/// assert!((cd[1] - 2.0).abs() < 1e-12);
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let m = objectives.first().map_or(0, Vec::len);
    crowding_indexed(objectives.len(), |pos, obj| objectives[pos][obj], m)
}

/// Shared implementation over an accessor `value(position, objective)`.
fn crowding_indexed<F>(n: usize, value: F, m: usize) -> Vec<f64>
where
    F: Fn(usize, usize) -> f64,
{
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let mut distances = vec![0.0f64; n];
    let mut indices: Vec<usize> = (0..n).collect();

    for obj in 0..m {
        indices.sort_by(|&a, &b| {
            value(a, obj)
                .partial_cmp(&value(b, obj))
                .unwrap_or(Ordering::Equal)
        });

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = value(indices[0], obj);
        let max_val = value(indices[n - 1], obj);
        let range = max_val - min_val;

        // Zero range: no contribution from this objective.
        if range > 0.0 && range.is_finite() {
            for i in 1..(n - 1) {
                let prev = value(indices[i - 1], obj);
                let next = value(indices[i + 1], obj);
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

// ============================================================================
// Tests
// ============================================================================
