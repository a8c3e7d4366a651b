//! Fast non-dominated sorting.

use super::{Fronts, Ranking};
use crate::dominance::{pareto_dominance, DominanceComparator};
use crate::error::Result;
use crate::solution::{validate_population, Solution};
use std::cmp::Ordering;
use tracing::instrument;

/// Fast non-dominated sort ranking (Deb et al., 2002).
///
/// # Algorithm
///
/// 1. Compare every unordered pair once with the [`DominanceComparator`],
///    recording how many solutions dominate each one and which solutions
///    each one dominates
/// 2. Solutions dominated by no other form front 0
/// 3. Removing a front decrements the counts of everything it dominates;
///    counts reaching zero form the next front
///
/// Within a front, solutions keep their input order.
///
/// # Complexity
///
/// O(m · n²) comparisons, O(n²) worst-case space for the dominance lists.
///
/// # Example
///
/// ```
/// use u_moea::ranking::{FastNonDominatedSort, Ranking};
/// use u_moea::solution::Solution;
///
/// let mut pop: Vec<_> = [[1.0, 5.0], [2.0, 3.0], [3.0, 2.0], [4.0, 4.0], [5.0, 1.0]]
///     .iter()
///     .map(|o| Solution::from_objectives(o.to_vec()))
///     .collect();
///
/// let fronts = FastNonDominatedSort::default().compute(&mut pop).unwrap();
/// assert_eq!(fronts.fronts, vec![vec![0, 1, 2, 4], vec![3]]);
/// assert_eq!(pop[3].attributes.rank, Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FastNonDominatedSort {
    comparator: DominanceComparator,
}

impl FastNonDominatedSort {
    /// Ranking with a custom dominance comparator.
    pub fn with_comparator(comparator: DominanceComparator) -> Self {
        Self { comparator }
    }
}

impl Ranking for FastNonDominatedSort {
    #[instrument(level = "debug", skip_all, fields(n = population.len()))]
    fn compute<V>(&self, population: &mut [Solution<V>]) -> Result<Fronts> {
        validate_population(population, None)?;

        let comparator = self.comparator;
        let fronts = sort_by(population.len(), |i, j| {
            comparator.compare(&population[i], &population[j])
        });

        for (s, &rank) in population.iter_mut().zip(fronts.ranks.iter()) {
            s.attributes.rank = Some(rank);
        }

        tracing::debug!(fronts = fronts.number_of_fronts(), "population ranked");
        Ok(fronts)
    }
}

/// Fast non-dominated sorting on raw objective vectors.
///
/// All objectives are **minimized**. Pure Pareto dominance is used; there
/// is no constraint handling at this level.
///
/// An empty input yields empty fronts.
///
/// # Panics
///
/// Debug builds panic if inner slices have inconsistent lengths.
///
/// # Example
///
/// ```
/// use u_moea::ranking::non_dominated_sort;
///
/// let objectives = vec![
///     vec![0.2, 0.9],
///     vec![0.6, 0.6], // behind (0.5, 0.5)
///     vec![0.5, 0.5],
///     vec![0.9, 0.1],
/// ];
///
/// let sorted = non_dominated_sort(&objectives);
/// assert_eq!(sorted.ranks, vec![0, 1, 0, 0]);
/// assert_eq!(sorted.fronts, vec![vec![0, 2, 3], vec![1]]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> Fronts {
    debug_assert!(
        objectives.windows(2).all(|w| w[0].len() == w[1].len()),
        "all objective vectors must have the same length"
    );
    sort_by(objectives.len(), |i, j| {
        pareto_dominance(&objectives[i], &objectives[j], 0.0)
    })
}

/// Core of the sort, generic over how a pair `(i, j)` is compared.
///
/// `compare(i, j)` returns `Less` when `i` dominates `j`.
fn sort_by<F>(n: usize, mut compare: F) -> Fronts
where
    F: FnMut(usize, usize) -> Ordering,
{
    if n == 0 {
        return Fronts::default();
    }
    if n == 1 {
        return Fronts {
            ranks: vec![0],
            fronts: vec![vec![0]],
        };
    }

    let mut domination_count = vec![0usize; n];
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];
    let mut front_0 = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            match compare(i, j) {
                Ordering::Less => {
                    // i dominates j
                    dominates[i].push(j);
                    domination_count[j] += 1;
                }
                Ordering::Greater => {
                    // j dominates i
                    dominates[j].push(i);
                    domination_count[i] += 1;
                }
                Ordering::Equal => {}
            }
        }

        // Every pair involving i has been seen by now.
        if domination_count[i] == 0 {
            front_0.push(i);
        }
    }

    let mut fronts = vec![front_0];
    loop {
        let current = &fronts[fronts.len() - 1];
        let mut next_front = Vec::new();

        for &i in current {
            for &j in &dominates[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len();
                    next_front.push(j);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        next_front.sort_unstable();
        fronts.push(next_front);
    }

    Fronts { ranks, fronts }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoeaError;
    use proptest::prelude::*;

    fn population(objs: &[Vec<f64>]) -> Vec<Solution<()>> {
        objs.iter()
            .map(|o| Solution::from_objectives(o.clone()))
            .collect()
    }

    // ---- Raw objective vectors ----

    #[test]
    fn test_empty_and_singleton() {
        let none = non_dominated_sort(&[]);
        assert!(none.fronts.is_empty() && none.ranks.is_empty());

        let one = non_dominated_sort(&[vec![7.0, -1.0]]);
        assert_eq!(one.ranks, vec![0]);
        assert_eq!(one.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_trade_off_pair_shares_front() {
        let sorted = non_dominated_sort(&[vec![0.2, 0.8], vec![0.8, 0.2]]);
        assert_eq!(sorted.fronts, vec![vec![0, 1]]);
    }

    #[test]
    fn test_chain_yields_one_front_per_level() {
        // 1 dominates 2 dominates 0
        let sorted = non_dominated_sort(&[vec![9.0, 9.0], vec![0.0, 0.0], vec![4.0, 4.0]]);
        assert_eq!(sorted.ranks, vec![2, 0, 1]);
        assert_eq!(sorted.fronts, vec![vec![1], vec![2], vec![0]]);
    }

    #[test]
    fn test_three_levels_with_trade_offs() {
        let objs = vec![
            vec![0.0, 6.0],
            vec![7.0, 7.0], // behind 3
            vec![2.0, 2.0],
            vec![4.0, 4.0], // behind 2
            vec![6.0, 0.0],
        ];
        assert_eq!(non_dominated_sort(&objs).ranks, vec![0, 2, 0, 1, 0]);
    }

    #[test]
    fn test_identical_vectors_share_front() {
        let sorted = non_dominated_sort(&vec![vec![1.5, 1.5]; 3]);
        assert_eq!(sorted.fronts, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_three_objectives_trade_off() {
        let objs = vec![
            vec![1.0, 5.0, 3.0],
            vec![3.0, 1.0, 5.0],
            vec![5.0, 3.0, 1.0],
            vec![4.0, 4.0, 4.0], // incomparable with each of the above
        ];
        assert_eq!(non_dominated_sort(&objs).number_of_fronts(), 1);
    }

    #[test]
    fn test_later_fronts_keep_input_order() {
        // Front 1 members are discovered through different dominators; the
        // front must still list them by index.
        let objs = vec![
            vec![5.0, 6.0], // front 1 (dominated by 3)
            vec![6.0, 2.0], // front 1 (dominated by 2)
            vec![1.0, 1.5], // front 0
            vec![0.5, 5.0], // front 0
        ];
        assert_eq!(non_dominated_sort(&objs).fronts, vec![vec![2, 3], vec![0, 1]]);
    }

    // ---- Population ranking ----

    #[test]
    fn test_five_point_scenario() {
        let mut pop = population(&[
            vec![1.0, 5.0],
            vec![2.0, 3.0],
            vec![3.0, 2.0],
            vec![4.0, 4.0],
            vec![5.0, 1.0],
        ]);
        let fronts = FastNonDominatedSort::default().compute(&mut pop).unwrap();
        assert_eq!(fronts.fronts, vec![vec![0, 1, 2, 4], vec![3]]);
        let ranks: Vec<_> = pop.iter().map(|s| s.attributes.rank).collect();
        assert_eq!(ranks, vec![Some(0), Some(0), Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn test_empty_population_yields_no_fronts() {
        let mut pop: Vec<Solution<()>> = Vec::new();
        let fronts = FastNonDominatedSort::default().compute(&mut pop).unwrap();
        assert!(fronts.is_empty());
    }

    #[test]
    fn test_constraint_violation_ranks_infeasible_last() {
        let mut pop = vec![
            Solution::from_objectives(vec![0.0, 0.0]).with_constraint_violation(2.0),
            Solution::from_objectives(vec![5.0, 5.0]),
            Solution::from_objectives(vec![0.0, 0.0]).with_constraint_violation(1.0),
        ];
        let fronts = FastNonDominatedSort::default().compute(&mut pop).unwrap();
        assert_eq!(fronts.fronts, vec![vec![1], vec![2], vec![0]]);
    }

    #[test]
    fn test_mismatched_objectives_rejected() {
        let mut pop = population(&[vec![1.0, 2.0], vec![1.0]]);
        let err = FastNonDominatedSort::default().compute(&mut pop).unwrap_err();
        assert!(matches!(err, MoeaError::ObjectiveCountMismatch { index: 1, .. }));
        // Nothing was ranked
        assert!(pop.iter().all(|s| s.attributes.rank.is_none()));
    }

    #[test]
    fn test_reranking_is_idempotent() {
        let mut pop = population(&[
            vec![1.0, 4.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
            vec![4.0, 1.0],
            vec![5.0, 5.0],
        ]);
        let ranking = FastNonDominatedSort::default();
        let first = ranking.compute(&mut pop).unwrap();
        let snapshot = pop.clone();
        let second = ranking.compute(&mut pop).unwrap();
        assert_eq!(first, second);
        assert_eq!(snapshot, pop);
    }

    // ---- Properties ----

    fn objective_sets() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..4).prop_flat_map(|m| {
            prop::collection::vec(
                prop::collection::vec((0u8..6).prop_map(f64::from), m),
                0..24,
            )
        })
    }

    proptest! {
        #[test]
        fn prop_fronts_partition_population(objs in objective_sets()) {
            let result = non_dominated_sort(&objs);

            // Union = population, pairwise disjoint
            let mut seen = vec![false; objs.len()];
            for front in &result.fronts {
                prop_assert!(!front.is_empty());
                for &i in front {
                    prop_assert!(!seen[i]);
                    seen[i] = true;
                }
            }
            prop_assert!(seen.iter().all(|&s| s));

            for (k, front) in result.fronts.iter().enumerate() {
                // Each front is pairwise non-dominated
                for &a in front {
                    prop_assert_eq!(result.ranks[a], k);
                    for &b in front {
                        prop_assert_eq!(pareto_dominance(&objs[a], &objs[b], 0.0) == Ordering::Less, false);
                    }
                }
                // Each member of front k+1 is dominated by someone in front k
                if k > 0 {
                    for &b in front {
                        let dominated = result.fronts[k - 1]
                            .iter()
                            .any(|&a| pareto_dominance(&objs[a], &objs[b], 0.0) == Ordering::Less);
                        prop_assert!(dominated);
                    }
                }
                // Stable partition
                prop_assert!(front.windows(2).all(|w| w[0] < w[1]));
            }
        }

        #[test]
        fn prop_reranking_changes_nothing(objs in objective_sets()) {
            let mut pop = population(&objs);
            let ranking = FastNonDominatedSort::default();
            let first = ranking.compute(&mut pop).unwrap();
            let ranks: Vec<_> = pop.iter().map(|s| s.attributes.rank).collect();

            let second = ranking.compute(&mut pop).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(pop.iter().map(|s| s.attributes.rank).collect::<Vec<_>>(), ranks);
        }
    }
}
