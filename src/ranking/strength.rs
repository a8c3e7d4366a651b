//! SPEA2 strength-based ranking.

use super::{Fronts, Ranking};
use crate::dominance::DominanceComparator;
use crate::error::Result;
use crate::solution::{validate_population, Solution};
use std::cmp::Ordering;
use tracing::instrument;

/// Ranks solutions by SPEA2 raw fitness.
///
/// - strength(i) = number of solutions `i` dominates
/// - raw(i) = sum of strength(j) over every `j` that dominates `i`
///
/// Solutions are grouped by ascending raw fitness; the group with raw
/// fitness 0 is exactly the non-dominated set. If `a` dominates `b` then
/// raw(b) > raw(a), so every group is pairwise non-dominated.
///
/// The raw fitness is written to `attributes.strength_fitness` and the
/// group index to `attributes.rank`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthRanking {
    comparator: DominanceComparator,
}

impl StrengthRanking {
    /// Ranking with a custom dominance comparator.
    pub fn with_comparator(comparator: DominanceComparator) -> Self {
        Self { comparator }
    }
}

impl Ranking for StrengthRanking {
    #[instrument(level = "debug", skip_all, fields(n = population.len()))]
    fn compute<V>(&self, population: &mut [Solution<V>]) -> Result<Fronts> {
        validate_population(population, None)?;
        let n = population.len();
        if n == 0 {
            return Ok(Fronts::default());
        }

        let mut strength = vec![0u64; n];
        let mut dominators: Vec<Vec<usize>> = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                match self.comparator.compare(&population[i], &population[j]) {
                    Ordering::Less => {
                        strength[i] += 1;
                        dominators[j].push(i);
                    }
                    Ordering::Greater => {
                        strength[j] += 1;
                        dominators[i].push(j);
                    }
                    Ordering::Equal => {}
                }
            }
        }

        let raw: Vec<u64> = dominators
            .iter()
            .map(|ds| ds.iter().map(|&d| strength[d]).sum())
            .collect();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| raw[i]);

        let mut fronts: Vec<Vec<usize>> = Vec::new();
        let mut ranks = vec![0usize; n];
        let mut previous = None;
        for i in order {
            if previous != Some(raw[i]) {
                fronts.push(Vec::new());
                previous = Some(raw[i]);
            }
            ranks[i] = fronts.len() - 1;
            if let Some(front) = fronts.last_mut() {
                front.push(i);
            }
        }

        for (i, s) in population.iter_mut().enumerate() {
            s.attributes.rank = Some(ranks[i]);
            s.attributes.strength_fitness = raw[i] as f64;
        }

        Ok(Fronts { ranks, fronts })
    }
}
