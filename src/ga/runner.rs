//! Multi-generation run driver.
//!
//! Ties the generational step to the stores: seed generation 0, then for each
//! later generation select the shortest routes of the previous one from the
//! route store, mutate them, and store the children that beat the worst
//! selected parent. No parent is asked for more than
//! [`MAX_CHILDREN_PER_PARENT`] children, however few parents the store returns.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::error::RoutingError;
use crate::models::{Route, RunId};
use crate::store::{DatasetStore, RouteStore};

use super::config::{ConfigError, EvolutionConfig, MAX_CHILDREN_PER_PARENT};
use super::generation::{advance_generation, seed_generation, BestOfRun};

/// Reasons a run stopped early.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Routing(#[from] RoutingError),
    /// No child of `generation` was shorter than the worst selected parent.
    #[error("generation {generation} produced no route shorter than its parents")]
    NoViableChildren { generation: u32 },
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub run_id: RunId,
    /// Shortest route over all generations.
    pub best: Route,
    /// Generations evolved after the seed population.
    pub generations_completed: u32,
    /// Shortest distance of each generation, starting with generation 0.
    pub history: Vec<f64>,
}

/// Drives a whole evolutionary run against a dataset store and a route store.
///
/// # Examples
///
/// ```
/// use tour_evolve::ga::{EvolutionConfig, EvolutionRunner};
/// use tour_evolve::models::{City, CityDataset, Location};
/// use tour_evolve::store::{InMemoryDatasetStore, InMemoryRouteStore};
///
/// let cities = (0..12)
///     .map(|i| {
///         let angle = i as f64 * 0.5236;
///         City::new(i, format!("C{i}"), Location::new(angle.sin(), angle.cos()))
///     })
///     .collect();
/// let datasets = InMemoryDatasetStore::new();
/// datasets.insert(CityDataset::from_cities("Ring", cities).unwrap()).unwrap();
/// let routes = InMemoryRouteStore::new();
///
/// let config = EvolutionConfig::default()
///     .with_region("Ring")
///     .with_population_size(50)
///     .with_num_parents(5)
///     .with_num_generations(2)
///     .with_seed(7);
/// let report = EvolutionRunner::new(config).run(&datasets, &routes).unwrap();
/// assert_eq!(report.generations_completed, 2);
/// assert_eq!(report.history.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionRunner {
    config: EvolutionConfig,
}

impl EvolutionRunner {
    pub fn new(config: EvolutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Runs with the random source described by the config.
    pub fn run<D, S>(&self, datasets: &D, routes: &S) -> Result<RunReport, RunError>
    where
        D: DatasetStore + ?Sized,
        S: RouteStore + ?Sized,
    {
        let mut rng = self.config.rng();
        self.run_with_rng(datasets, routes, &mut rng)
    }

    /// Runs with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// - [`RunError::Config`] if the config is invalid.
    /// - [`RunError::Routing`] if the region is unknown, a store fails, or
    ///   the previous generation has no stored routes to select.
    /// - [`RunError::NoViableChildren`] if a generation keeps no child.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            region = %self.config.region,
            population = self.config.population_size,
            generations = self.config.num_generations
        )
    )]
    pub fn run_with_rng<D, S, R>(
        &self,
        datasets: &D,
        routes: &S,
        rng: &mut R,
    ) -> Result<RunReport, RunError>
    where
        D: DatasetStore + ?Sized,
        S: RouteStore + ?Sized,
        R: Rng,
    {
        let config = &self.config;
        config.validate()?;
        let dataset = datasets.fetch(&config.region)?;

        let run_id = RunId::generate(rng);
        let seeds = seed_generation(&dataset, run_id, config.population_size, rng)?;
        let mut best = BestOfRun::new();
        let mut history = Vec::with_capacity(config.num_generations as usize + 1);
        best.observe(&seeds);
        history.extend(shortest(&seeds));
        routes.put_batch(seeds)?;

        for generation in 1..=config.num_generations {
            let parents =
                routes.query_best_by_distance(&run_id, generation - 1, config.num_parents)?;
            let Some(worst) = parents.last() else {
                return Err(RoutingError::EmptyParentSet.into());
            };
            let threshold = worst.distance();
            let children_per_parent =
                (config.population_size / parents.len()).min(MAX_CHILDREN_PER_PARENT);

            let children =
                advance_generation(&parents, children_per_parent, threshold, &dataset, rng)?;
            let Some(leader) = children.first() else {
                return Err(RunError::NoViableChildren { generation });
            };
            history.push(leader.distance());
            best.observe(&children);
            debug!(
                generation,
                parents = parents.len(),
                children = children.len(),
                shortest = leader.distance(),
                "generation stored"
            );
            routes.put_batch(children)?;
        }

        let best = best.into_best().ok_or(RoutingError::EmptyParentSet)?;
        info!(run_id = %run_id, distance = best.distance(), "run finished");
        Ok(RunReport {
            run_id,
            best,
            generations_completed: config.num_generations,
            history,
        })
    }
}

fn shortest(routes: &[Route]) -> Option<f64> {
    routes.iter().map(Route::distance).min_by(f64::total_cmp)
}
