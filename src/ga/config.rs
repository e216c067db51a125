//! Evolution run configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Most children a single parent may be asked for in one generation.
pub const MAX_CHILDREN_PER_PARENT: usize = 25;

/// Invalid [`EvolutionConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    ZeroPopulation,
    #[error("num_parents must be at least 1")]
    ZeroParents,
    #[error("num_generations must be at least 1")]
    ZeroGenerations,
    #[error("num_parents ({parents}) exceeds population_size ({population})")]
    ParentsExceedPopulation { parents: usize, population: usize },
    #[error("{children} children per parent exceeds the limit of {}", MAX_CHILDREN_PER_PARENT)]
    TooManyChildren { children: usize },
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Parameters of one evolutionary run.
///
/// Each generation after the seed keeps the `num_parents` shortest routes of
/// the previous generation and asks each of them for
/// `population_size / num_parents` children.
///
/// # Examples
///
/// ```
/// use tour_evolve::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_region("Minnesota")
///     .with_population_size(60)
///     .with_num_parents(6)
///     .with_num_generations(15)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.children_per_parent(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Region whose city dataset the run is scored against.
    pub region: String,
    /// Routes seeded in generation 0, and the child budget of later ones.
    pub population_size: usize,
    /// Shortest routes of a generation kept as parents of the next.
    pub num_parents: usize,
    /// Generations evolved after the seed population.
    pub num_generations: u32,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            region: "Minnesota".to_string(),
            population_size: 100,
            num_parents: 10,
            num_generations: 20,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Parses a JSON config. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_num_parents(mut self, parents: usize) -> Self {
        self.num_parents = parents;
        self
    }

    pub fn with_num_generations(mut self, generations: u32) -> Self {
        self.num_generations = generations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the parameters for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.num_parents == 0 {
            return Err(ConfigError::ZeroParents);
        }
        if self.num_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.num_parents > self.population_size {
            return Err(ConfigError::ParentsExceedPopulation {
                parents: self.num_parents,
                population: self.population_size,
            });
        }
        let children = self.children_per_parent();
        if children > MAX_CHILDREN_PER_PARENT {
            return Err(ConfigError::TooManyChildren { children });
        }
        Ok(())
    }

    /// Children each of the full parent set is asked for per generation.
    pub fn children_per_parent(&self) -> usize {
        self.population_size / self.num_parents.max(1)
    }

    /// Random source for the run: seeded if [`seed`](Self::seed) is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
