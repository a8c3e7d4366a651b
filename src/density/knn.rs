//! k-th nearest neighbour distance (SPEA2 density).

use super::DensityEstimator;
use crate::solution::Solution;
use std::cmp::Ordering;

/// Distance to the k-th nearest neighbour within the front.
///
/// Distances are Euclidean in objective space. SPEA2 uses `k = 1` in
/// practice (the PISA recommendation) rather than `sqrt(n)`.
///
/// A front with `k` members or fewer has no k-th neighbour for anyone, so
/// every member gets `f64::INFINITY`.
///
/// Writes into `attributes.knn_distance`; larger means more isolated.
#[derive(Debug, Clone, Copy)]
pub struct KnnDistance {
    k: usize,
}

impl Default for KnnDistance {
    fn default() -> Self {
        Self { k: 1 }
    }
}

impl KnnDistance {
    /// Creates an estimator for the `k`-th neighbour (`k` is raised to 1).
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }

    /// The neighbour index.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl DensityEstimator for KnnDistance {
    fn compute<V>(&self, population: &mut [Solution<V>], front: &[usize]) {
        let n = front.len();
        if n <= self.k {
            for &i in front {
                population[i].attributes.knn_distance = f64::INFINITY;
            }
            return;
        }

        let mut results = Vec::with_capacity(n);
        let mut row = Vec::with_capacity(n - 1);
        for &i in front {
            row.clear();
            row.extend(
                front
                    .iter()
                    .filter(|&&j| j != i)
                    .map(|&j| euclidean(&population[i].objectives, &population[j].objectives)),
            );
            let (_, kth, _) = row.select_nth_unstable_by(self.k - 1, |a, b| a.total_cmp(b));
            results.push(*kth);
        }

        for (&i, d) in front.iter().zip(results) {
            population[i].attributes.knn_distance = d;
        }
    }

    fn density<V>(&self, solution: &Solution<V>) -> f64 {
        solution.attributes.knn_distance
    }

    /// Sorts by descending k-th neighbour distance; ties are broken by the
    /// (k+1)-th neighbour, then the next one, and so on (SPEA2 truncation).
    fn sort_by_density<V>(&self, population: &[Solution<V>], front: &mut [usize]) {
        let neighbours: Vec<(usize, Vec<f64>)> = front
            .iter()
            .map(|&i| {
                let mut row: Vec<f64> = front
                    .iter()
                    .filter(|&&j| j != i)
                    .map(|&j| euclidean(&population[i].objectives, &population[j].objectives))
                    .collect();
                row.sort_by(f64::total_cmp);
                let skip = (self.k - 1).min(row.len());
                (i, row.split_off(skip))
            })
            .collect();

        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| {
            let (da, db) = (&neighbours[a].1, &neighbours[b].1);
            da.iter()
                .zip(db)
                .map(|(x, y)| y.total_cmp(x))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        for (slot, pos) in front.iter_mut().zip(order) {
            *slot = neighbours[pos].0;
        }
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
