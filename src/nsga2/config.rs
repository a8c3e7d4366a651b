//! NSGA-II configuration.
//!
//! [`Nsga2Config`] holds all parameters that control the evolutionary loop.

use crate::error::{MoeaError, Result};
use crate::replacement::MatingSelection;

/// Configuration for the NSGA-II loop.
///
/// Controls population and offspring sizes, parent selection, operator
/// rates, termination conditions, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_moea::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.offspring_population_size, 100);
/// assert_eq!(config.max_generations, 250);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moea::nsga2::Nsga2Config;
/// use u_moea::replacement::MatingSelection;
///
/// let config = Nsga2Config::default()
///     .with_population_size(50)
///     .with_selection(MatingSelection::Tournament(3))
///     .with_max_evaluations(25_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Number of solutions that survive each generation.
    pub population_size: usize,

    /// Number of offspring created per generation.
    ///
    /// Equal to `population_size` for generational NSGA-II, 1 for the
    /// steady-state variant.
    pub offspring_population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Optional evaluation budget, counting the initial population.
    ///
    /// The last generation is shortened so the budget is never exceeded.
    pub max_evaluations: Option<usize>,

    /// Parent selection strategy.
    pub selection: MatingSelection,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub crossover_rate: f64,

    /// Probability of calling the problem's mutation on an offspring
    /// (0.0–1.0). Per-variable probabilities belong to the operator itself.
    pub mutation_rate: f64,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Has no effect unless the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds, checked between
    /// generations.
    pub time_limit_ms: Option<u64>,

    /// Capacity of an internal crowding-distance archive fed with every
    /// evaluated solution. `None` disables it.
    pub archive_capacity: Option<usize>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            offspring_population_size: 100,
            max_generations: 250,
            max_evaluations: None,
            selection: MatingSelection::default(),
            crossover_rate: 0.9,
            mutation_rate: 1.0,
            parallel: true,
            seed: None,
            time_limit_ms: None,
            archive_capacity: None,
        }
    }
}

impl Nsga2Config {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of offspring per generation.
    pub fn with_offspring_population_size(mut self, n: usize) -> Self {
        self.offspring_population_size = n;
        self
    }

    /// Steady-state variant: one offspring per generation.
    pub fn steady_state(self) -> Self {
        self.with_offspring_population_size(1)
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = Some(n);
        self
    }

    /// Sets the parent selection strategy.
    pub fn with_selection(mut self, selection: MatingSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Keeps a crowding-distance archive of the given capacity.
    pub fn with_archive_capacity(mut self, capacity: usize) -> Self {
        self.archive_capacity = Some(capacity);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(MoeaError::invalid_config(
                "population_size must be at least 2",
            ));
        }
        if self.offspring_population_size == 0 {
            return Err(MoeaError::invalid_config(
                "offspring_population_size must be at least 1",
            ));
        }
        if self.max_generations == 0 {
            return Err(MoeaError::invalid_config("max_generations must be at least 1"));
        }
        if let Some(budget) = self.max_evaluations {
            if budget < self.population_size {
                return Err(MoeaError::invalid_config(
                    "max_evaluations must cover the initial population",
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(MoeaError::invalid_config("crossover_rate must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(MoeaError::invalid_config("mutation_rate must be in [0, 1]"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(MoeaError::invalid_config(
                "time_limit_ms must be positive or None",
            ));
        }
        if self.archive_capacity == Some(0) {
            return Err(MoeaError::InvalidCapacity { capacity: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Nsga2Config::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.selection, MatingSelection::Tournament(2));
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.max_evaluations.is_none());
        assert!(config.archive_capacity.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Nsga2Config::default()
            .with_population_size(40)
            .with_offspring_population_size(20)
            .with_max_generations(10)
            .with_max_evaluations(500)
            .with_selection(MatingSelection::Random)
            .with_crossover_rate(0.7)
            .with_mutation_rate(0.2)
            .with_parallel(false)
            .with_seed(9)
            .with_time_limit_ms(1000)
            .with_archive_capacity(30);

        assert_eq!(config.population_size, 40);
        assert_eq!(config.offspring_population_size, 20);
        assert_eq!(config.max_generations, 10);
        assert_eq!(config.max_evaluations, Some(500));
        assert_eq!(config.selection, MatingSelection::Random);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.time_limit_ms, Some(1000));
        assert_eq!(config.archive_capacity, Some(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_steady_state() {
        assert_eq!(
            Nsga2Config::default().steady_state().offspring_population_size,
            1
        );
    }

    #[test]
    fn test_clamp_rates() {
        let config = Nsga2Config::default()
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);
        assert_eq!(config.crossover_rate, 0.0);
        assert_eq!(config.mutation_rate, 1.0);
    }

    #[test]
    fn test_validate_errors() {
        let bad = [
            Nsga2Config::default().with_population_size(1),
            Nsga2Config::default().with_offspring_population_size(0),
            Nsga2Config::default().with_max_generations(0),
            Nsga2Config::default().with_max_evaluations(10),
            Nsga2Config::default().with_time_limit_ms(0),
            Nsga2Config {
                crossover_rate: f64::NAN,
                ..Nsga2Config::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(MoeaError::InvalidConfig(_))),
                "{config:?}"
            );
        }
        assert_eq!(
            Nsga2Config::default().with_archive_capacity(0).validate(),
            Err(MoeaError::InvalidCapacity { capacity: 0 })
        );
    }
}
