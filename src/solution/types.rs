//! Solution representation.

/// Scores attached to a solution by the ranking and density components.
///
/// Every field is recomputed from scratch each generation; nothing here is
/// diffed incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    /// Front index assigned by a [`Ranking`](crate::ranking::Ranking).
    /// `None` until the solution has been ranked.
    pub rank: Option<usize>,

    /// Crowding distance within the solution's front (may be `+∞`).
    pub crowding_distance: f64,

    /// Distance to the k-th nearest neighbour within the front (may be `+∞`).
    pub knn_distance: f64,

    /// Exclusive hypervolume contribution inside a hypervolume archive.
    pub hypervolume_contribution: f64,

    /// SPEA2 raw fitness: summed strength of the solutions dominating this one.
    pub strength_fitness: f64,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            rank: None,
            crowding_distance: 0.0,
            knn_distance: 0.0,
            hypervolume_contribution: 0.0,
            strength_fitness: 0.0,
        }
    }
}

/// Objective values and constraint violation produced by evaluating one
/// decision vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// One value per objective, lower is better.
    pub objectives: Vec<f64>,

    /// Overall constraint violation, `0.0` when feasible.
    pub constraint_violation: f64,
}

impl Evaluation {
    /// A feasible evaluation.
    pub fn feasible(objectives: Vec<f64>) -> Self {
        Self {
            objectives,
            constraint_violation: 0.0,
        }
    }
}

/// A candidate solution of a multi-objective problem.
///
/// All objectives are **minimized**. The constraint violation is a
/// non-negative degree where `0.0` means feasible; a larger value is worse
/// regardless of objectives.
///
/// # Examples
///
/// ```
/// use u_moea::solution::Solution;
///
/// let s: Solution<f64> = Solution::new(vec![0.3, 0.7], vec![1.0, 2.0]);
/// assert!(s.is_feasible());
/// assert_eq!(s.number_of_objectives(), 2);
/// assert_eq!(s.attributes.rank, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution<V> {
    /// Decision vector; its meaning is defined by the problem.
    pub variables: Vec<V>,

    /// Objective vector, lower is better.
    pub objectives: Vec<f64>,

    /// Overall constraint violation degree (0 = feasible).
    pub constraint_violation: f64,

    /// Scores written by ranking, density estimation, and archives.
    pub attributes: Attributes,
}

impl<V> Solution<V> {
    /// Creates a feasible solution with default attributes.
    pub fn new(variables: Vec<V>, objectives: Vec<f64>) -> Self {
        Self {
            variables,
            objectives,
            constraint_violation: 0.0,
            attributes: Attributes::default(),
        }
    }

    /// Creates a solution from a decision vector and its evaluation.
    pub fn evaluated(variables: Vec<V>, evaluation: Evaluation) -> Self {
        Self {
            variables,
            objectives: evaluation.objectives,
            constraint_violation: evaluation.constraint_violation,
            attributes: Attributes::default(),
        }
    }

    /// Sets the constraint violation degree.
    pub fn with_constraint_violation(mut self, violation: f64) -> Self {
        self.constraint_violation = violation;
        self
    }

    /// Number of objectives.
    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Whether the solution violates no constraint.
    pub fn is_feasible(&self) -> bool {
        self.constraint_violation <= 0.0
    }

    /// Returns the rank, or `usize::MAX` for an unranked solution.
    pub fn rank_or_max(&self) -> usize {
        self.attributes.rank.unwrap_or(usize::MAX)
    }
}

impl Solution<()> {
    /// Creates a solution that only carries objective values.
    ///
    /// Handy for fronts read back from a file, or for tests.
    pub fn from_objectives(objectives: Vec<f64>) -> Self {
        Self::new(Vec::new(), objectives)
    }
}
