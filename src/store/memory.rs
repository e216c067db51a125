//! In-process stores guarded by `RwLock`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Resource, RoutingError};
use crate::models::{CityDataset, Route, RouteId, RunId};

use super::{DatasetStore, RouteStore};

/// Region name to dataset map.
///
/// # Examples
///
/// ```
/// use tour_evolve::models::{City, CityDataset, Location};
/// use tour_evolve::store::{DatasetStore, InMemoryDatasetStore};
///
/// let cities = (0..3)
///     .map(|i| City::new(i, format!("C{i}"), Location::new(45.0, -93.0 + i as f64)))
///     .collect();
/// let store = InMemoryDatasetStore::new();
/// store.insert(CityDataset::from_cities("Minnesota", cities).unwrap()).unwrap();
///
/// assert_eq!(store.fetch("Minnesota").unwrap().len(), 3);
/// assert!(store.fetch("Iowa").is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDatasetStore {
    datasets: RwLock<HashMap<String, Arc<CityDataset>>>,
}

impl InMemoryDatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `dataset` under its region, replacing any previous one.
    pub fn insert(&self, dataset: CityDataset) -> Result<Arc<CityDataset>, RoutingError> {
        let dataset = Arc::new(dataset);
        self.datasets
            .write()
            .map_err(|_| poisoned())?
            .insert(dataset.region().to_string(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Names of the stored regions, sorted.
    pub fn regions(&self) -> Result<Vec<String>, RoutingError> {
        let mut regions: Vec<_> = self
            .datasets
            .read()
            .map_err(|_| poisoned())?
            .keys()
            .cloned()
            .collect();
        regions.sort();
        Ok(regions)
    }
}

impl DatasetStore for InMemoryDatasetStore {
    fn fetch(&self, region: &str) -> Result<Arc<CityDataset>, RoutingError> {
        self.datasets
            .read()
            .map_err(|_| poisoned())?
            .get(region)
            .cloned()
            .ok_or_else(|| RoutingError::NotFound(Resource::Region(region.to_string())))
    }
}

/// Route distance with a total order, for use as an index key.
#[derive(Debug, Clone, Copy)]
struct DistanceKey(f64);

impl PartialEq for DistanceKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DistanceKey {}

impl PartialOrd for DistanceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DistanceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

type GenerationKey = (RunId, u32);
type GenerationIndex = BTreeSet<(DistanceKey, RouteId)>;

#[derive(Debug, Default)]
struct RouteTables {
    by_id: HashMap<RouteId, Route>,
    by_generation: BTreeMap<GenerationKey, GenerationIndex>,
}

impl RouteTables {
    fn insert(&mut self, route: Route) {
        if let Some(old) = self.by_id.remove(&route.route_id()) {
            let key = (old.run_id(), old.generation());
            if let Some(index) = self.by_generation.get_mut(&key) {
                index.remove(&(DistanceKey(old.distance()), old.route_id()));
                if index.is_empty() {
                    self.by_generation.remove(&key);
                }
            }
        }
        self.by_generation
            .entry((route.run_id(), route.generation()))
            .or_default()
            .insert((DistanceKey(route.distance()), route.route_id()));
        self.by_id.insert(route.route_id(), route);
    }
}

/// Routes keyed by ID, with a per-generation index ordered by distance.
///
/// [`query_best_by_distance`](RouteStore::query_best_by_distance) walks the
/// front of one generation's index and never scans other routes.
#[derive(Debug, Default)]
pub struct InMemoryRouteStore {
    tables: RwLock<RouteTables>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored routes.
    pub fn len(&self) -> Result<usize, RoutingError> {
        Ok(self.read()?.by_id.len())
    }

    pub fn is_empty(&self) -> Result<bool, RoutingError> {
        Ok(self.read()?.by_id.is_empty())
    }

    /// Number of stored routes in one generation of a run.
    pub fn generation_len(&self, run_id: &RunId, generation: u32) -> Result<usize, RoutingError> {
        Ok(self
            .read()?
            .by_generation
            .get(&(*run_id, generation))
            .map_or(0, BTreeSet::len))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RouteTables>, RoutingError> {
        self.tables.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RouteTables>, RoutingError> {
        self.tables.write().map_err(|_| poisoned())
    }
}

impl RouteStore for InMemoryRouteStore {
    fn put(&self, route: Route) -> Result<(), RoutingError> {
        self.write()?.insert(route);
        Ok(())
    }

    fn put_batch(&self, routes: Vec<Route>) -> Result<(), RoutingError> {
        if routes.is_empty() {
            return Ok(());
        }
        let mut tables = self.write()?;
        for route in routes {
            tables.insert(route);
        }
        Ok(())
    }

    fn get_by_id(&self, route_id: &RouteId) -> Result<Route, RoutingError> {
        self.read()?
            .by_id
            .get(route_id)
            .cloned()
            .ok_or(RoutingError::NotFound(Resource::Route(*route_id)))
    }

    fn query_best_by_distance(
        &self,
        run_id: &RunId,
        generation: u32,
        limit: usize,
    ) -> Result<Vec<Route>, RoutingError> {
        let tables = self.read()?;
        let Some(index) = tables.by_generation.get(&(*run_id, generation)) else {
            return Ok(Vec::new());
        };
        Ok(index
            .iter()
            .take(limit)
            .filter_map(|(_, id)| tables.by_id.get(id).cloned())
            .collect())
    }
}

fn poisoned() -> RoutingError {
    RoutingError::Store("lock poisoned".to_string())
}
