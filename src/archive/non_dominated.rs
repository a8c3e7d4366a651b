//! Unbounded non-dominated archive.

use super::{Archive, DuplicatePolicy, Members};
use crate::error::Result;
use crate::solution::Solution;

/// Archive keeping every non-dominated solution offered to it.
///
/// # Examples
///
/// ```
/// use u_moea::archive::{Archive, NonDominatedArchive};
/// use u_moea::solution::Solution;
///
/// let mut archive = NonDominatedArchive::new();
/// assert!(archive.add(Solution::from_objectives(vec![2.0, 2.0])));
/// assert!(archive.add(Solution::from_objectives(vec![1.0, 3.0])));
/// // Dominates (2, 2), which is removed.
/// assert!(archive.add(Solution::from_objectives(vec![1.0, 1.0])));
/// assert_eq!(archive.size(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NonDominatedArchive<V> {
    members: Members<V>,
}

impl<V> Default for NonDominatedArchive<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NonDominatedArchive<V> {
    pub fn new() -> Self {
        Self::with_duplicates(DuplicatePolicy::Reject)
    }

    pub fn with_duplicates(duplicates: DuplicatePolicy) -> Self {
        Self {
            members: Members::new(duplicates),
        }
    }

    /// Like [`Archive::add`], but reports a malformed candidate as an error.
    pub fn try_add(&mut self, solution: Solution<V>) -> Result<bool> {
        self.members.check(&solution)?;
        Ok(self.members.admit(solution))
    }
}

impl<V> Archive<V> for NonDominatedArchive<V> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoeaError;

    fn sol(o: &[f64]) -> Solution<()> {
        Solution::from_objectives(o.to_vec())
    }

    #[test]
    fn test_rejects_dominated_candidate() {
        let mut archive = NonDominatedArchive::new();
        assert!(archive.add(sol(&[1.0, 1.0])));
        assert!(!archive.add(sol(&[2.0, 2.0])));
        assert_eq!(archive.size(), 1);
    }

    #[test]
    fn test_removes_every_dominated_member() {
        let mut archive = NonDominatedArchive::new();
        archive.add(sol(&[1.0, 4.0]));
        archive.add(sol(&[2.0, 3.0]));
        archive.add(sol(&[4.0, 1.0]));
        assert!(archive.add(sol(&[0.5, 2.5])));
        let objs: Vec<_> = archive.iter().map(|s| s.objectives.clone()).collect();
        assert_eq!(objs, vec![vec![4.0, 1.0], vec![0.5, 2.5]]);
    }

    #[test]
    fn test_duplicate_policy() {
        let mut reject = NonDominatedArchive::new();
        assert!(reject.add(sol(&[1.0, 2.0])));
        assert!(!reject.add(sol(&[1.0, 2.0])));

        let mut allow = NonDominatedArchive::with_duplicates(DuplicatePolicy::Allow);
        assert!(allow.add(sol(&[1.0, 2.0])));
        assert!(allow.add(sol(&[1.0, 2.0])));
        assert_eq!(allow.size(), 2);
    }

    #[test]
    fn test_feasible_candidate_replaces_infeasible_members() {
        let mut archive = NonDominatedArchive::new();
        archive.add(sol(&[0.0, 0.0]).with_constraint_violation(2.0));
        assert!(archive.add(sol(&[5.0, 5.0])));
        assert_eq!(archive.size(), 1);
        assert!(archive.solutions()[0].is_feasible());
        assert!(!archive.add(sol(&[0.0, 0.0]).with_constraint_violation(0.5)));
    }

    #[test]
    fn test_malformed_candidate() {
        let mut archive = NonDominatedArchive::new();
        archive.add(sol(&[1.0, 2.0]));
        assert!(matches!(
            archive.try_add(sol(&[1.0])),
            Err(MoeaError::ObjectiveCountMismatch { .. })
        ));
        assert!(!archive.add(sol(&[f64::NAN, 0.0])));
        assert_eq!(archive.into_solutions().len(), 1);
    }
}
