//! Route type: one scored candidate tour.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::evaluation::total_distance;

use super::{CityDataset, RouteId, RunId};

/// A candidate tour through every city of a dataset, with its score.
///
/// `path` is a permutation of the dataset's city indices, read as a closed
/// cycle. `distance` is the cycle's total length. Routes are never modified
/// after creation; each optimization step builds new ones.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tour_evolve::models::{City, CityDataset, Location, Route, RouteId, RunId};
///
/// let cities = (0..3)
///     .map(|i| City::new(i, format!("C{i}"), Location::new(0.0, i as f64)))
///     .collect();
/// let dataset = CityDataset::from_cities("Line", cities).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let run_id = RunId::generate(&mut rng);
/// let route = Route::evaluate(RouteId::generate(&mut rng), run_id, 0, vec![2, 0, 1], &dataset).unwrap();
/// assert_eq!(route.generation(), 0);
/// assert_eq!(route.path(), &[2, 0, 1]);
/// assert!(route.distance() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    route_id: RouteId,
    run_id: RunId,
    generation: u32,
    path: Vec<usize>,
    distance: f64,
}

impl Route {
    /// Builds a route, checking that `path` is a permutation of the dataset's
    /// cities and computing its closed-tour distance.
    pub fn evaluate(
        route_id: RouteId,
        run_id: RunId,
        generation: u32,
        path: Vec<usize>,
        dataset: &CityDataset,
    ) -> Result<Self, RoutingError> {
        let distance = total_distance(&path, dataset)?;
        Ok(Self {
            route_id,
            run_id,
            generation,
            path,
            distance,
        })
    }

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// Run this route belongs to.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Generation index within the run (0 = random seed population).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// City indices in visiting order.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Closed-tour length.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of cities visited.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Short form of this route.
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            route_id: self.route_id,
            distance: self.distance,
        }
    }
}

/// A route's ID and distance, without the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub route_id: RouteId,
    pub distance: f64,
}
