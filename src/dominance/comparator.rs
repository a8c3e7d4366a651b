//! Dominance comparison.

use crate::solution::Solution;
use std::cmp::Ordering;

/// Compares two objective vectors under Pareto dominance (minimization).
///
/// Returns `Less` if `a` dominates `b`, `Greater` if `b` dominates `a`,
/// and `Equal` when neither dominates (including identical vectors).
/// Values within `epsilon` of each other count as equal.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use u_moea::dominance::pareto_dominance;
///
/// assert_eq!(pareto_dominance(&[1.0, 2.0], &[2.0, 2.0], 0.0), Ordering::Less);
/// assert_eq!(pareto_dominance(&[1.0, 3.0], &[2.0, 2.0], 0.0), Ordering::Equal);
/// assert_eq!(pareto_dominance(&[2.0, 2.0], &[2.0, 2.0], 0.0), Ordering::Equal);
/// ```
pub fn pareto_dominance(a: &[f64], b: &[f64], epsilon: f64) -> Ordering {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "cannot compare objective vectors of different lengths"
    );

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va + epsilon < vb {
            a_better_in_some = true;
        } else if vb + epsilon < va {
            b_better_in_some = true;
        }
        if a_better_in_some && b_better_in_some {
            return Ordering::Equal;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Orders two solutions by constraint violation, lower first.
///
/// Two feasible solutions, or two with the same violation degree, compare
/// `Equal`.
pub fn constraint_violation_cmp<V>(a: &Solution<V>, b: &Solution<V>) -> Ordering {
    let va = a.constraint_violation.max(0.0);
    let vb = b.constraint_violation.max(0.0);
    va.partial_cmp(&vb).unwrap_or(Ordering::Equal)
}

/// Whether two solutions have identical objective vectors.
pub fn equal_objectives<V>(a: &Solution<V>, b: &Solution<V>) -> bool {
    a.objectives == b.objectives
}

/// NSGA-II crowded comparison.
///
/// Lower rank first; within the same rank, larger crowding distance first.
/// Unranked solutions sort after ranked ones.
pub fn crowded_comparison<V>(a: &Solution<V>, b: &Solution<V>) -> Ordering {
    a.rank_or_max().cmp(&b.rank_or_max()).then_with(|| {
        b.attributes
            .crowding_distance
            .partial_cmp(&a.attributes.crowding_distance)
            .unwrap_or(Ordering::Equal)
    })
}

/// Pairwise dominance comparator with constraint-violation precedence.
///
/// The comparison proceeds in two steps:
///
/// 1. If constraints are enabled (the default) and the violation degrees
///    differ, the less violating solution wins regardless of objectives.
/// 2. Otherwise Pareto dominance decides: `a` dominates `b` iff `a` is no
///    worse in every objective and strictly better in at least one.
///
/// The comparator is `Copy` and has no state that changes during a
/// comparison, so it can be shared across threads over read-only solutions.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use u_moea::dominance::DominanceComparator;
/// use u_moea::solution::Solution;
///
/// let cmp = DominanceComparator::default();
/// let a = Solution::from_objectives(vec![1.0, 1.0]);
/// let b = Solution::from_objectives(vec![2.0, 2.0]);
/// let infeasible = Solution::from_objectives(vec![0.0, 0.0]).with_constraint_violation(1.0);
///
/// assert_eq!(cmp.compare(&a, &b), Ordering::Less);
/// // Feasibility beats objectives.
/// assert_eq!(cmp.compare(&b, &infeasible), Ordering::Less);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DominanceComparator {
    epsilon: f64,
    check_constraints: bool,
}

impl Default for DominanceComparator {
    fn default() -> Self {
        Self {
            epsilon: 0.0,
            check_constraints: true,
        }
    }
}

impl DominanceComparator {
    /// Comparator with constraint precedence and exact dominance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Comparator that ignores constraint violation.
    pub fn ignoring_constraints() -> Self {
        Self {
            check_constraints: false,
            ..Self::default()
        }
    }

    /// Treats objective values within `epsilon` of each other as equal.
    ///
    /// Negative or NaN values are clamped to `0.0`.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon > 0.0 { epsilon } else { 0.0 };
        self
    }

    /// The epsilon tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Compares `a` against `b`.
    ///
    /// `Less` means `a` dominates `b`, `Greater` means `b` dominates `a`,
    /// `Equal` means they are mutually non-dominated.
    pub fn compare<V>(&self, a: &Solution<V>, b: &Solution<V>) -> Ordering {
        if self.check_constraints {
            let by_violation = constraint_violation_cmp(a, b);
            if by_violation != Ordering::Equal {
                return by_violation;
            }
        }
        pareto_dominance(&a.objectives, &b.objectives, self.epsilon)
    }

    /// Whether `a` dominates `b`.
    pub fn dominates<V>(&self, a: &Solution<V>, b: &Solution<V>) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sol(objs: &[f64]) -> Solution<()> {
        Solution::from_objectives(objs.to_vec())
    }

    // ---- Pareto dominance ----

    #[test]
    fn test_single_objective() {
        assert_eq!(pareto_dominance(&[4.0], &[4.0], 0.0), Ordering::Equal);
        assert_eq!(pareto_dominance(&[4.0], &[2.0], 0.0), Ordering::Greater);
        assert_eq!(pareto_dominance(&[-1.0], &[2.0], 0.0), Ordering::Less);
    }

    #[test]
    fn test_three_objective_cases() {
        // All strictly better
        assert_eq!(
            pareto_dominance(&[-1.0, 5.0, 9.0], &[2.0, 6.0, 15.0], 0.0),
            Ordering::Less
        );
        // Better in one, equal in the others
        assert_eq!(
            pareto_dominance(&[-1.0, 5.0, 9.0], &[-1.0, 5.0, 10.0], 0.0),
            Ordering::Less
        );
        assert_eq!(
            pareto_dominance(&[-1.0, 5.0, 9.0], &[-2.0, 5.0, 9.0], 0.0),
            Ordering::Greater
        );
        // Trade-off
        assert_eq!(
            pareto_dominance(&[-1.0, 1.0, 9.0], &[-2.0, 5.0, 9.0], 0.0),
            Ordering::Equal
        );
    }

    #[test]
    fn test_antisymmetric() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 3.0, 3.0];
        assert_eq!(pareto_dominance(&a, &b, 0.0), Ordering::Less);
        assert_eq!(pareto_dominance(&b, &a, 0.0), Ordering::Greater);
    }

    #[test]
    fn test_epsilon_absorbs_small_differences() {
        assert_eq!(pareto_dominance(&[1.0, 1.0], &[1.05, 1.0], 0.1), Ordering::Equal);
        assert_eq!(pareto_dominance(&[1.0, 1.0], &[1.2, 1.0], 0.1), Ordering::Less);
    }

    // ---- Constraint precedence ----

    #[test]
    fn test_less_violation_wins_regardless_of_objectives() {
        let cmp = DominanceComparator::default();
        let good_but_infeasible = sol(&[0.0, 0.0]).with_constraint_violation(3.0);
        let bad_but_less_infeasible = sol(&[10.0, 10.0]).with_constraint_violation(1.0);
        assert_eq!(
            cmp.compare(&bad_but_less_infeasible, &good_but_infeasible),
            Ordering::Less
        );
        assert_eq!(
            cmp.compare(&good_but_infeasible, &bad_but_less_infeasible),
            Ordering::Greater
        );
    }

    #[test]
    fn test_equal_violation_falls_back_to_pareto() {
        let cmp = DominanceComparator::default();
        let a = sol(&[1.0, 1.0]).with_constraint_violation(2.0);
        let b = sol(&[2.0, 2.0]).with_constraint_violation(2.0);
        assert_eq!(cmp.compare(&a, &b), Ordering::Less);
        assert!(cmp.dominates(&a, &b));
        assert!(!cmp.dominates(&b, &a));
    }

    #[test]
    fn test_ignoring_constraints() {
        let cmp = DominanceComparator::ignoring_constraints();
        let a = sol(&[1.0, 1.0]).with_constraint_violation(5.0);
        let b = sol(&[2.0, 2.0]);
        assert_eq!(cmp.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_identical_vectors_are_equal() {
        let cmp = DominanceComparator::default();
        assert_eq!(cmp.compare(&sol(&[1.0, 2.0]), &sol(&[1.0, 2.0])), Ordering::Equal);
        assert!(equal_objectives(&sol(&[1.0, 2.0]), &sol(&[1.0, 2.0])));
        assert!(!equal_objectives(&sol(&[1.0, 2.0]), &sol(&[2.0, 1.0])));
    }

    #[test]
    fn test_negative_epsilon_clamped() {
        let cmp = DominanceComparator::new().with_epsilon(-1.0);
        assert_eq!(cmp.epsilon(), 0.0);
    }

    // ---- Crowded comparison ----

    #[test]
    fn test_crowded_comparison_prefers_rank_then_distance() {
        let mut a = sol(&[1.0, 2.0]);
        let mut b = sol(&[2.0, 1.0]);
        a.attributes.rank = Some(0);
        b.attributes.rank = Some(1);
        b.attributes.crowding_distance = f64::INFINITY;
        assert_eq!(crowded_comparison(&a, &b), Ordering::Less);

        b.attributes.rank = Some(0);
        a.attributes.crowding_distance = 0.5;
        assert_eq!(crowded_comparison(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_crowded_comparison_unranked_last() {
        let mut ranked = sol(&[5.0]);
        ranked.attributes.rank = Some(7);
        let unranked = sol(&[0.0]);
        assert_eq!(crowded_comparison(&ranked, &unranked), Ordering::Less);
    }
}
