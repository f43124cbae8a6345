//! Evolution run configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the generational
//! loop.

use crate::error::CovwalkError;

/// Configuration for the covering-walk GA.
///
/// # Defaults
///
/// ```
/// use u_covwalk::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.generation_limit, 1500);
/// assert_eq!(config.elite_count, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_covwalk::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(40)
///     .with_generation_limit(200)
///     .with_mutation_probability(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of genomes per generation. Must be even and at least 4.
    pub population_size: usize,

    /// Number of generations to run. There is no early exit.
    pub generation_limit: usize,

    /// Probability that each offspring is mutated (0.0–1.0).
    pub mutation_probability: f64,

    /// Top-ranked genomes copied unchanged into the next generation.
    pub elite_count: usize,

    /// How many times a parent pair is re-drawn when crossover finds no
    /// aligned cut point, before the parents pass through unchanged.
    pub max_parent_reselections: usize,

    /// Whether to score each generation in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from OS entropy, so reruns differ.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generation_limit: 1500,
            mutation_probability: 0.35,
            elite_count: 2,
            max_parent_reselections: 32,
            parallel: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generation_limit(mut self, n: usize) -> Self {
        self.generation_limit = n;
        self
    }

    /// Sets the offspring mutation probability, clamped to `[0, 1]`.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the parent re-selection budget for unalignable pairs.
    pub fn with_max_parent_reselections(mut self, n: usize) -> Self {
        self.max_parent_reselections = n;
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of offspring pairs bred per generation.
    pub fn offspring_pairs(&self) -> usize {
        self.population_size.saturating_sub(self.elite_count) / 2
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`CovwalkError::InvalidConfig`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), CovwalkError> {
        let invalid = |msg: &str| Err(CovwalkError::InvalidConfig(msg.into()));

        if self.population_size < 4 {
            return invalid("population_size must be at least 4");
        }
        if self.population_size % 2 != 0 {
            return invalid("population_size must be even");
        }
        if self.generation_limit == 0 {
            return invalid("generation_limit must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return invalid("mutation_probability must be within [0, 1]");
        }
        if self.elite_count == 0 {
            return invalid("elite_count must be at least 1");
        }
        if self.elite_count >= self.population_size {
            return invalid("elite_count too high: elites fill entire population");
        }
        if (self.population_size - self.elite_count) % 2 != 0 {
            return invalid("population_size - elite_count must be even");
        }
        Ok(())
    }
}
