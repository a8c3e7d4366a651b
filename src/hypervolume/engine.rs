//! Recursive slicing hypervolume.

use crate::error::{MoeaError, Result};
use crate::solution::Solution;
use std::cmp::Ordering;

/// Hypervolume engine for a fixed reference point.
///
/// # Algorithm
///
/// - 1 objective: `ref - min`
/// - 2 objectives: sweep over points sorted by the first objective, summing
///   the rectangles of the staircase
/// - 3+ objectives: slice along the objective with the most distinct values;
///   each slab between consecutive values (the last one up to the reference)
///   contributes `width × HV(m-1)` of the points seen so far. Zero-width
///   slabs from duplicate values contribute nothing
///
/// Points that are not strictly better than the reference in every
/// objective dominate no volume inside the reference box and are dropped.
///
/// # Example
///
/// ```
/// use u_moea::hypervolume::Hypervolume;
///
/// let hv = Hypervolume::new(vec![1.0, 1.0]).unwrap();
/// let front = vec![vec![0.1, 0.9], vec![0.5, 0.5], vec![0.9, 0.1]];
///
/// let volume = hv.compute(&front).unwrap();
/// assert!((volume - 0.33).abs() < 1e-12);
///
/// let contributions = hv.contributions(&front).unwrap();
/// assert!((contributions[1] - 0.16).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hypervolume {
    reference_point: Vec<f64>,
}

impl Hypervolume {
    /// Creates an engine for `reference_point`.
    ///
    /// Returns [`MoeaError::InvalidReferencePoint`] if the point is empty or
    /// has a non-finite coordinate.
    pub fn new(reference_point: Vec<f64>) -> Result<Self> {
        if reference_point.is_empty() || reference_point.iter().any(|v| !v.is_finite()) {
            return Err(MoeaError::InvalidReferencePoint);
        }
        Ok(Self { reference_point })
    }

    /// The reference point.
    pub fn reference_point(&self) -> &[f64] {
        &self.reference_point
    }

    /// Hypervolume dominated by `front`.
    pub fn compute(&self, front: &[Vec<f64>]) -> Result<f64> {
        let points = self.checked(front.iter().map(Vec::as_slice))?;
        Ok(volume_of(&points, &self.reference_point))
    }

    /// Hypervolume dominated by the objective vectors of `solutions`.
    pub fn compute_solutions<V>(&self, solutions: &[Solution<V>]) -> Result<f64> {
        let points = self.checked(solutions.iter().map(|s| s.objectives.as_slice()))?;
        Ok(volume_of(&points, &self.reference_point))
    }

    /// Exclusive contribution of each point: `HV(front) - HV(front \ {p})`.
    ///
    /// Dominated points, duplicates, and points outside the reference box
    /// contribute 0.
    pub fn contributions(&self, front: &[Vec<f64>]) -> Result<Vec<f64>> {
        let points = self.checked(front.iter().map(Vec::as_slice))?;
        Ok(contributions_of(&points, &self.reference_point))
    }

    /// Index of the point with the smallest exclusive contribution.
    ///
    /// Ties go to the lowest index. `None` for an empty front.
    pub fn least_contributor(&self, front: &[Vec<f64>]) -> Result<Option<usize>> {
        let contributions = self.contributions(front)?;
        Ok(argmin(&contributions))
    }

    fn checked<'a, I>(&self, points: I) -> Result<Vec<&'a [f64]>>
    where
        I: Iterator<Item = &'a [f64]>,
    {
        let m = self.reference_point.len();
        points
            .map(|p| {
                if p.len() != m {
                    Err(MoeaError::ReferencePointMismatch {
                        expected: m,
                        found: p.len(),
                    })
                } else {
                    Ok(p)
                }
            })
            .collect()
    }
}

/// Index of the smallest value, first one on ties.
pub(crate) fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Hypervolume of `points` against `reference`. Dimensions are not checked.
pub(crate) fn volume_of(points: &[&[f64]], reference: &[f64]) -> f64 {
    let inside = inside_reference(points, reference);
    let dims: Vec<usize> = (0..reference.len()).collect();
    slice_volume(inside, reference, &dims)
}

/// Exclusive contributions of `points`. Dimensions are not checked.
pub(crate) fn contributions_of(points: &[&[f64]], reference: &[f64]) -> Vec<f64> {
    if reference.len() == 2 {
        if let Some(contributions) = contributions_2d(points, reference) {
            return contributions;
        }
    }

    let total = volume_of(points, reference);
    let mut others: Vec<&[f64]> = Vec::with_capacity(points.len().saturating_sub(1));
    (0..points.len())
        .map(|i| {
            if !strictly_inside(points[i], reference) {
                return 0.0;
            }
            others.clear();
            others.extend(
                points
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, p)| *p),
            );
            (total - volume_of(&others, reference)).max(0.0)
        })
        .collect()
}

fn strictly_inside(point: &[f64], reference: &[f64]) -> bool {
    point.iter().zip(reference).all(|(p, r)| p < r)
}

fn inside_reference<'a>(points: &[&'a [f64]], reference: &[f64]) -> Vec<&'a [f64]> {
    let inside: Vec<&[f64]> = points
        .iter()
        .copied()
        .filter(|p| strictly_inside(p, reference))
        .collect();
    if inside.len() < points.len() {
        tracing::trace!(
            dropped = points.len() - inside.len(),
            "points outside the reference box ignored"
        );
    }
    inside
}

fn slice_volume<'a>(mut points: Vec<&'a [f64]>, reference: &[f64], dims: &[usize]) -> f64 {
    match (points.len(), dims.len()) {
        (0, _) | (_, 0) => 0.0,
        (1, _) => dims.iter().map(|&d| reference[d] - points[0][d]).product(),
        (_, 1) => {
            let d = dims[0];
            let min = points.iter().map(|p| p[d]).fold(f64::INFINITY, f64::min);
            reference[d] - min
        }
        (_, 2) => area_2d(&mut points, reference, dims[0], dims[1]),
        (n, _) => {
            let pivot_pos = most_distinct(&points, dims);
            let pivot = dims[pivot_pos];
            let rest: Vec<usize> = dims
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != pivot_pos)
                .map(|(_, &d)| d)
                .collect();

            points.sort_by(|a, b| a[pivot].total_cmp(&b[pivot]));

            let mut volume = 0.0;
            let mut active: Vec<&[f64]> = Vec::with_capacity(n);
            for i in 0..n {
                active.push(points[i]);
                let upper = if i + 1 < n {
                    points[i + 1][pivot]
                } else {
                    reference[pivot]
                };
                let width = upper - points[i][pivot];
                if width <= 0.0 {
                    continue;
                }
                // A point dominated in the projection stays dominated for
                // every later slab, so it can be dropped for good.
                active = non_dominated(&active, &rest);
                volume += width * slice_volume(active.clone(), reference, &rest);
            }
            volume
        }
    }
}

/// Area of the staircase of `points` in dimensions `(x, y)`.
fn area_2d(points: &mut [&[f64]], reference: &[f64], x: usize, y: usize) -> f64 {
    points.sort_by(|a, b| a[x].total_cmp(&b[x]).then(a[y].total_cmp(&b[y])));

    let mut area = 0.0;
    let mut prev_y = reference[y];
    for p in points.iter() {
        if p[y] < prev_y {
            area += (reference[x] - p[x]) * (prev_y - p[y]);
            prev_y = p[y];
        }
    }
    area
}

/// Position in `dims` of the dimension with the most distinct values.
fn most_distinct(points: &[&[f64]], dims: &[usize]) -> usize {
    let mut best = (0, 0);
    let mut values: Vec<f64> = Vec::with_capacity(points.len());
    for (k, &d) in dims.iter().enumerate() {
        values.clear();
        values.extend(points.iter().map(|p| p[d]));
        values.sort_by(f64::total_cmp);
        values.dedup();
        if values.len() > best.1 {
            best = (k, values.len());
        }
    }
    best.0
}

/// Non-dominated subset of `points` projected on `dims`.
///
/// Of several identical projections only the first is kept.
fn non_dominated<'a>(points: &[&'a [f64]], dims: &[usize]) -> Vec<&'a [f64]> {
    let mut kept = Vec::with_capacity(points.len());
    'candidates: for (i, p) in points.iter().enumerate() {
        for (j, q) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            match projected_dominance(q, p, dims) {
                Ordering::Less => continue 'candidates,
                Ordering::Equal if j < i && same_projection(q, p, dims) => continue 'candidates,
                _ => {}
            }
        }
        kept.push(*p);
    }
    kept
}

fn projected_dominance(a: &[f64], b: &[f64], dims: &[usize]) -> Ordering {
    let mut a_better = false;
    let mut b_better = false;
    for &d in dims {
        match a[d].partial_cmp(&b[d]) {
            Some(Ordering::Less) => a_better = true,
            Some(Ordering::Greater) => b_better = true,
            _ => {}
        }
    }
    match (a_better, b_better) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn same_projection(a: &[f64], b: &[f64], dims: &[usize]) -> bool {
    dims.iter().all(|&d| a[d] == b[d])
}

/// Closed-form exclusive contributions in two dimensions.
///
/// When the points inside the reference box form a strict staircase (no
/// dominated or duplicated member) a point's exclusive region is the
/// rectangle bounded by its staircase neighbours, or the reference point at
/// either end. Returns `None` otherwise.
fn contributions_2d(points: &[&[f64]], reference: &[f64]) -> Option<Vec<f64>> {
    let mut order: Vec<usize> = (0..points.len())
        .filter(|&i| strictly_inside(points[i], reference))
        .collect();
    order.sort_by(|&a, &b| {
        points[a][0]
            .total_cmp(&points[b][0])
            .then(points[a][1].total_cmp(&points[b][1]))
    });

    let strict = order.windows(2).all(|w| {
        let (a, b) = (points[w[0]], points[w[1]]);
        a[0] < b[0] && a[1] > b[1]
    });
    if !strict {
        return None;
    }

    let mut contributions = vec![0.0; points.len()];
    for (k, &i) in order.iter().enumerate() {
        let next_x = order.get(k + 1).map_or(reference[0], |&j| points[j][0]);
        let prev_y = if k == 0 {
            reference[1]
        } else {
            points[order[k - 1]][1]
        };
        contributions[i] = (next_x - points[i][0]) * (prev_y - points[i][1]);
    }
    Some(contributions)
}

// ============================================================================
// Tests
// ============================================================================
