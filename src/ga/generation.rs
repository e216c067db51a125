//! Generational step: seeding, mutation, threshold filtering and ranking.
//!
//! A generation is every route sharing a `(run_id, generation)` pair. The
//! seed population (generation 0) is uniformly random; each later generation
//! is made of mutated children of the previous generation's selected parents.

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::constructive::random_route;
use crate::error::RoutingError;
use crate::models::{CityDataset, Route, RouteId, RunId};

use super::mutation::mutate;

/// Length threshold that keeps every child.
pub const NO_THRESHOLD: f64 = f64::INFINITY;

/// Creates `count` independent random routes at generation 0 of `run_id`.
///
/// # Errors
///
/// [`RoutingError::InvalidPath`] if the dataset has no cities.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tour_evolve::models::{City, CityDataset, Location, RunId};
/// use tour_evolve::ga::seed_generation;
///
/// let cities = (0..5)
///     .map(|i| City::new(i, format!("C{i}"), Location::new(0.0, i as f64)))
///     .collect();
/// let dataset = CityDataset::from_cities("Line", cities).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let run_id = RunId::generate(&mut rng);
/// let seeds = seed_generation(&dataset, run_id, 8, &mut rng).unwrap();
/// assert_eq!(seeds.len(), 8);
/// assert!(seeds.iter().all(|r| r.generation() == 0 && r.run_id() == run_id));
/// ```
#[instrument(level = "debug", skip_all, fields(run_id = %run_id, count = count, cities = dataset.len()))]
pub fn seed_generation<R: Rng>(
    dataset: &CityDataset,
    run_id: RunId,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Route>, RoutingError> {
    let routes = (0..count)
        .map(|_| {
            let path = random_route(dataset, rng);
            Route::evaluate(RouteId::generate(rng), run_id, 0, path, dataset)
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(seeded = routes.len(), "seeded generation 0");
    Ok(routes)
}

/// Produces the next generation from `parents`.
///
/// Each parent yields `children_per_parent` independent mutated children.
/// Children whose distance is not strictly below `length_store_threshold` are
/// dropped (pass [`NO_THRESHOLD`] to keep all). The survivors are returned
/// sorted by ascending distance; order among equal distances is unspecified.
///
/// An empty result is not an error: it means no child beat the threshold.
///
/// # Errors
///
/// - [`RoutingError::EmptyParentSet`] if `parents` is empty.
/// - [`RoutingError::TooShortToMutate`] if the tours have fewer than 4 cities.
/// - [`RoutingError::InvalidPath`] if a parent's path does not fit `dataset`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tour_evolve::models::{City, CityDataset, Location, RunId};
/// use tour_evolve::ga::{advance_generation, seed_generation, NO_THRESHOLD};
///
/// let cities = (0..6)
///     .map(|i| City::new(i, format!("C{i}"), Location::new(0.0, i as f64)))
///     .collect();
/// let dataset = CityDataset::from_cities("Line", cities).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let parents = seed_generation(&dataset, RunId::generate(&mut rng), 2, &mut rng).unwrap();
/// let children = advance_generation(&parents, 3, NO_THRESHOLD, &dataset, &mut rng).unwrap();
/// assert_eq!(children.len(), 6);
/// assert!(children.windows(2).all(|w| w[0].distance() <= w[1].distance()));
/// ```
#[instrument(
    level = "debug",
    skip_all,
    fields(
        parents = parents.len(),
        children_per_parent = children_per_parent,
        threshold = length_store_threshold
    )
)]
pub fn advance_generation<R: Rng>(
    parents: &[Route],
    children_per_parent: usize,
    length_store_threshold: f64,
    dataset: &CityDataset,
    rng: &mut R,
) -> Result<Vec<Route>, RoutingError> {
    if parents.is_empty() {
        return Err(RoutingError::EmptyParentSet);
    }

    let mut children = Vec::with_capacity(parents.len() * children_per_parent);
    for parent in parents {
        for _ in 0..children_per_parent {
            children.push(mutate(parent, dataset, rng)?);
        }
    }
    let produced = children.len();

    let mut survivors = retain_below(children, length_store_threshold);
    rank_by_distance(&mut survivors);

    if survivors.is_empty() && produced > 0 {
        warn!(produced, "every child was at or above the length threshold");
    } else {
        debug!(produced, kept = survivors.len(), "advanced generation");
    }
    Ok(survivors)
}

/// Keeps the routes whose distance is strictly below `threshold`.
pub fn retain_below(mut routes: Vec<Route>, threshold: f64) -> Vec<Route> {
    routes.retain(|r| r.distance() < threshold);
    routes
}

/// Sorts routes by ascending distance.
pub fn rank_by_distance(routes: &mut [Route]) {
    routes.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
}

/// Running minimum-distance route across the generations of one run.
///
/// A generation's best replaces the current best only if strictly shorter.
#[derive(Debug, Clone, Default)]
pub struct BestOfRun {
    best: Option<Route>,
}

impl BestOfRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a generation into the running best.
    ///
    /// Returns `true` if the best route changed.
    pub fn observe(&mut self, generation: &[Route]) -> bool {
        let Some(candidate) = generation
            .iter()
            .min_by(|a, b| a.distance().total_cmp(&b.distance()))
        else {
            return false;
        };

        let improves = self
            .best
            .as_ref()
            .map_or(true, |best| candidate.distance() < best.distance());
        if improves {
            info!(
                route_id = %candidate.route_id(),
                generation = candidate.generation(),
                distance = candidate.distance(),
                "new best route"
            );
            self.best = Some(candidate.clone());
        }
        improves
    }

    /// Shortest route seen so far.
    pub fn best(&self) -> Option<&Route> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<Route> {
        self.best
    }
}
