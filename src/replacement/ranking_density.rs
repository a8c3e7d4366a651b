//! Ranking-and-density replacement (NSGA-II, SPEA2 style).

use super::Replacement;
use crate::density::{CrowdingDistance, DensityEstimator, KnnDistance};
use crate::error::{MoeaError, Result};
use crate::ranking::{FastNonDominatedSort, Ranking, StrengthRanking};
use crate::solution::Solution;
use tracing::instrument;

/// How the last, partially fitting front is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemovalPolicy {
    /// Compute densities once and keep the best.
    #[default]
    OneShot,
    /// Remove the worst member, recompute densities, and repeat.
    Sequential,
}

/// Merges population and offspring, ranks the union, and fills the next
/// generation front by front.
///
/// # Algorithm
///
/// 1. Rank `population ++ offspring` into fronts
/// 2. Take whole fronts while they fit, computing their densities
/// 3. Sort the first front that does not fit by density (descending,
///    stable) and take what is needed
///
/// The output is in front order. Whole fronts keep their input order.
///
/// When `population` is empty the whole offspring list survives (ranked);
/// when `offspring` is empty the population comes back ranked and in front
/// order.
///
/// # Example
///
/// ```
/// use u_moea::replacement::{RankingAndDensityReplacement, Replacement};
/// use u_moea::solution::Solution;
///
/// let pop: Vec<_> = [[1.0, 5.0], [4.0, 4.0]]
///     .iter()
///     .map(|o| Solution::from_objectives(o.to_vec()))
///     .collect();
/// let offspring = vec![Solution::from_objectives(vec![5.0, 1.0])];
///
/// let next = RankingAndDensityReplacement::nsga2().replace(pop, offspring).unwrap();
/// assert_eq!(next.len(), 2);
/// assert!(next.iter().all(|s| s.attributes.rank == Some(0)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingAndDensityReplacement<R, D> {
    ranking: R,
    density: D,
    removal: RemovalPolicy,
}

impl<R: Ranking, D: DensityEstimator> RankingAndDensityReplacement<R, D> {
    pub fn new(ranking: R, density: D) -> Self {
        Self {
            ranking,
            density,
            removal: RemovalPolicy::default(),
        }
    }

    pub fn with_removal(mut self, removal: RemovalPolicy) -> Self {
        self.removal = removal;
        self
    }

    pub fn removal(&self) -> RemovalPolicy {
        self.removal
    }

    /// Picks `count` members of `front` by density.
    fn truncate<V>(&self, merged: &mut [Solution<V>], front: &[usize], count: usize) -> Vec<usize> {
        let mut kept = front.to_vec();
        if self.removal == RemovalPolicy::Sequential {
            while kept.len() > count {
                self.density.compute(merged, &kept);
                self.density.sort_by_density(merged, &mut kept);
                kept.pop();
            }
        }
        self.density.compute(merged, &kept);
        self.density.sort_by_density(merged, &mut kept);
        kept.truncate(count);
        kept
    }
}

impl RankingAndDensityReplacement<FastNonDominatedSort, CrowdingDistance> {
    /// Fast non-dominated sort with crowding distance.
    pub fn nsga2() -> Self {
        Self::new(FastNonDominatedSort::default(), CrowdingDistance)
    }
}

impl RankingAndDensityReplacement<StrengthRanking, KnnDistance> {
    /// Strength ranking with sequential nearest-neighbour truncation.
    pub fn spea2() -> Self {
        Self::new(StrengthRanking::default(), KnnDistance::default())
            .with_removal(RemovalPolicy::Sequential)
    }
}

impl<R: Ranking, D: DensityEstimator> Replacement for RankingAndDensityReplacement<R, D> {
    #[instrument(
        level = "debug",
        skip_all,
        fields(population = population.len(), offspring = offspring.len())
    )]
    fn replace<V>(
        &self,
        population: Vec<Solution<V>>,
        offspring: Vec<Solution<V>>,
    ) -> Result<Vec<Solution<V>>> {
        if population.is_empty() && offspring.is_empty() {
            return Err(MoeaError::EmptyPopulation);
        }
        let target = if population.is_empty() {
            offspring.len()
        } else {
            population.len()
        };

        let mut merged = population;
        merged.extend(offspring);
        let fronts = self.ranking.compute(&mut merged)?;

        let mut selected: Vec<usize> = Vec::with_capacity(target);
        for front in fronts.iter() {
            let room = target - selected.len();
            if room == 0 {
                break;
            }
            if front.len() <= room {
                self.density.compute(&mut merged, front);
                selected.extend_from_slice(front);
            } else {
                selected.extend(self.truncate(&mut merged, front, room));
            }
        }

        tracing::debug!(
            fronts = fronts.number_of_fronts(),
            survivors = selected.len(),
            "population replaced"
        );

        let mut slots: Vec<Option<Solution<V>>> = merged.into_iter().map(Some).collect();
        Ok(selected
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect())
    }

    fn density<V>(&self, solution: &Solution<V>) -> f64 {
        self.density.density(solution)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sols(objs: &[[f64; 2]]) -> Vec<Solution<()>> {
        objs.iter()
            .map(|o| Solution::from_objectives(o.to_vec()))
            .collect()
    }

    fn objectives(list: &[Solution<()>]) -> Vec<Vec<f64>> {
        list.iter().map(|s| s.objectives.clone()).collect()
    }

    fn spea2_one_shot() -> RankingAndDensityReplacement<StrengthRanking, KnnDistance> {
        RankingAndDensityReplacement::new(StrengthRanking::default(), KnnDistance::new(1))
    }

    // ---- Edge cases ----

    #[test]
    fn test_both_empty_is_an_error() {
        let r = RankingAndDensityReplacement::nsga2();
        assert_eq!(
            r.replace(Vec::<Solution<()>>::new(), Vec::new()).unwrap_err(),
            MoeaError::EmptyPopulation
        );
    }

    #[test]
    fn test_empty_offspring_returns_ranked_population() {
        let pop = sols(&[[1.0, 5.0], [2.0, 4.0], [3.0, 3.0], [5.0, 1.0]]);
        let next = spea2_one_shot().replace(pop, Vec::new()).unwrap();
        assert_eq!(next.len(), 4);
        assert!(next.iter().all(|s| s.attributes.rank == Some(0)));
    }

    #[test]
    fn test_empty_population_keeps_all_offspring() {
        let offspring = sols(&[[4.0, 4.0], [1.0, 1.0]]);
        let next = RankingAndDensityReplacement::nsga2()
            .replace(Vec::new(), offspring)
            .unwrap();
        assert_eq!(objectives(&next), vec![vec![1.0, 1.0], vec![4.0, 4.0]]);
        assert_eq!(next[1].attributes.rank, Some(1));
    }

    #[test]
    fn test_mismatched_objectives_are_reported() {
        let pop = sols(&[[1.0, 2.0]]);
        let offspring = vec![Solution::from_objectives(vec![1.0])];
        assert!(matches!(
            RankingAndDensityReplacement::nsga2().replace(pop, offspring),
            Err(MoeaError::ObjectiveCountMismatch { index: 1, .. })
        ));
    }

    // ---- Strength ranking + kNN ----

    #[test]
    fn test_spea2_one_offspring() {
        // Population (1,5), (2,4), (3,3); offspring (5,1).
        // (2,4) is the most crowded once ties on the first neighbour are
        // broken by the second.
        let pop = sols(&[[1.0, 5.0], [2.0, 4.0], [3.0, 3.0]]);
        let offspring = sols(&[[5.0, 1.0]]);
        let next = spea2_one_shot().replace(pop, offspring).unwrap();
        assert_eq!(
            objectives(&next),
            vec![vec![5.0, 1.0], vec![1.0, 5.0], vec![3.0, 3.0]]
        );
    }

    #[test]
    fn test_spea2_dominated_offspring_is_dropped() {
        // Population (1,5), (2,4), (5,1); offspring (3,3), (2.5,2.5).
        // (2.5,2.5) dominates (3,3), which ends up alone in the second front.
        let pop = sols(&[[1.0, 5.0], [2.0, 4.0], [5.0, 1.0]]);
        let offspring = sols(&[[3.0, 3.0], [2.5, 2.5]]);
        let next = spea2_one_shot().replace(pop, offspring).unwrap();

        let objs = objectives(&next);
        assert_eq!(objs.len(), 3);
        assert!(objs.contains(&vec![1.0, 5.0]));
        assert!(objs.contains(&vec![2.5, 2.5]));
        assert!(objs.contains(&vec![5.0, 1.0]));
    }

    // ---- Fast non-dominated sort + crowding ----

    #[test]
    fn test_nsga2_takes_whole_fronts_first() {
        let pop = sols(&[[1.0, 5.0], [4.0, 4.0], [5.0, 1.0]]);
        let offspring = sols(&[[3.0, 3.0], [6.0, 6.0], [2.0, 2.0]]);
        let next = RankingAndDensityReplacement::nsga2()
            .replace(pop, offspring)
            .unwrap();

        // Front 0 = (1,5), (5,1), (2,2); all fit exactly.
        assert_eq!(
            objectives(&next),
            vec![vec![1.0, 5.0], vec![5.0, 1.0], vec![2.0, 2.0]]
        );
    }

    #[test]
    fn test_nsga2_truncates_last_front_by_crowding() {
        let pop = sols(&[[0.0, 0.0], [1.0, 9.0], [2.0, 8.0], [9.0, 1.0]]);
        let offspring = sols(&[[5.0, 5.0], [2.1, 7.9], [10.0, 10.0], [11.0, 11.0]]);
        let next = RankingAndDensityReplacement::nsga2()
            .replace(pop, offspring)
            .unwrap();

        // Front 0 = (0,0); front 1 has five members and three places left.
        assert_eq!(next.len(), 4);
        assert_eq!(next[0].objectives, vec![0.0, 0.0]);
        let rest = objectives(&next[1..]);
        assert!(rest.contains(&vec![1.0, 9.0]));
        assert!(rest.contains(&vec![9.0, 1.0]));
        // The truncated front is sorted by descending crowding distance.
        assert!(next[1..]
            .windows(2)
            .all(|w| w[0].attributes.crowding_distance >= w[1].attributes.crowding_distance));
    }

    #[test]
    fn test_sequential_removal_recomputes_density() {
        // Two points close together in the middle of the front: both look
        // crowded at first, but once one of them is gone the other covers
        // the gap.
        let pop = sols(&[[0.0, 10.0], [2.0, 8.0], [4.9, 5.1], [10.0, 0.0]]);
        let offspring = sols(&[[5.1, 4.9], [8.0, 2.0]]);
        let middle = |objs: &Vec<Vec<f64>>| {
            objs.iter()
                .filter(|o| **o == vec![4.9, 5.1] || **o == vec![5.1, 4.9])
                .count()
        };

        let one_shot = RankingAndDensityReplacement::nsga2()
            .replace(pop.clone(), offspring.clone())
            .unwrap();
        let sequential = RankingAndDensityReplacement::nsga2()
            .with_removal(RemovalPolicy::Sequential)
            .replace(pop, offspring)
            .unwrap();

        assert_eq!(one_shot.len(), 4);
        assert_eq!(sequential.len(), 4);
        assert_eq!(middle(&objectives(&one_shot)), 0);
        assert_eq!(middle(&objectives(&sequential)), 1);
    }

    #[test]
    fn test_spea2_survivors_carry_mating_density() {
        let pop = sols(&[[1.0, 5.0], [2.0, 4.0], [3.0, 3.0]]);
        let offspring = sols(&[[5.0, 1.0]]);
        let replacement = RankingAndDensityReplacement::spea2();
        let next = replacement.replace(pop, offspring).unwrap();

        assert!(next.iter().all(|s| replacement.density(s) > 0.0));
        assert!(next.iter().all(|s| s.attributes.crowding_distance == 0.0));
    }

    #[test]
    fn test_spea2_preset_uses_sequential_removal() {
        assert_eq!(
            RankingAndDensityReplacement::spea2().removal(),
            RemovalPolicy::Sequential
        );
        assert_eq!(
            RankingAndDensityReplacement::nsga2().removal(),
            RemovalPolicy::OneShot
        );
    }
}
