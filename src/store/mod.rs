//! Persistence contracts for city datasets and routes.
//!
//! The engine only talks to storage through [`DatasetStore`] and
//! [`RouteStore`]. [`InMemoryDatasetStore`] and [`InMemoryRouteStore`] are
//! strongly consistent implementations for tests and single-process runs.

mod memory;

pub use memory::{InMemoryDatasetStore, InMemoryRouteStore};

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::RoutingError;
use crate::models::{CityDataset, Route, RouteId, RunId};

/// Retries used by [`fetch_with_retries`] callers that have no better value.
pub const DEFAULT_FETCH_RETRIES: u32 = 3;

/// Pause between [`fetch_with_retries`] attempts.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(1);

/// Source of city datasets, keyed by region name.
pub trait DatasetStore: Send + Sync {
    /// Returns the dataset for `region`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::NotFound`] if no dataset is stored under `region`.
    fn fetch(&self, region: &str) -> Result<Arc<CityDataset>, RoutingError>;
}

/// Persistent collection of routes.
///
/// Routes are looked up by ID, or by `(run_id, generation)` in ascending
/// distance order.
pub trait RouteStore: Send + Sync {
    /// Stores one route, replacing any route with the same ID.
    fn put(&self, route: Route) -> Result<(), RoutingError>;

    /// Stores many routes. An empty batch is a no-op.
    fn put_batch(&self, routes: Vec<Route>) -> Result<(), RoutingError> {
        for route in routes {
            self.put(route)?;
        }
        Ok(())
    }

    /// Returns the route with `route_id`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::NotFound`] if no such route is stored.
    fn get_by_id(&self, route_id: &RouteId) -> Result<Route, RoutingError>;

    /// Returns up to `limit` routes of one generation, shortest first.
    fn query_best_by_distance(
        &self,
        run_id: &RunId,
        generation: u32,
        limit: usize,
    ) -> Result<Vec<Route>, RoutingError>;
}

/// Looks up a route, retrying on [`RoutingError::NotFound`].
///
/// Covers stores whose writes become visible to reads after a delay. Makes
/// at most `retries + 1` attempts, sleeping `delay` between them. Any other
/// error is returned immediately.
pub fn fetch_with_retries<S: RouteStore + ?Sized>(
    store: &S,
    route_id: &RouteId,
    retries: u32,
    delay: Duration,
) -> Result<Route, RoutingError> {
    let mut attempt = 0;
    loop {
        match store.get_by_id(route_id) {
            Err(RoutingError::NotFound(_)) if attempt < retries => {
                attempt += 1;
                debug!(route_id = %route_id, attempt, "route not visible yet, retrying");
                thread::sleep(delay);
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Resource;
    use crate::models::{City, Location};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Hides every route until it has been asked for `lag` times.
    struct LaggingStore {
        inner: InMemoryRouteStore,
        lag: u32,
        calls: AtomicU32,
    }

    impl RouteStore for LaggingStore {
        fn put(&self, route: Route) -> Result<(), RoutingError> {
            self.inner.put(route)
        }

        fn get_by_id(&self, route_id: &RouteId) -> Result<Route, RoutingError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.lag {
                return Err(RoutingError::NotFound(Resource::Route(*route_id)));
            }
            self.inner.get_by_id(route_id)
        }

        fn query_best_by_distance(
            &self,
            run_id: &RunId,
            generation: u32,
            limit: usize,
        ) -> Result<Vec<Route>, RoutingError> {
            self.inner.query_best_by_distance(run_id, generation, limit)
        }
    }

    fn stored_route(store: &LaggingStore) -> Route {
        let cities = (0..4)
            .map(|i| City::new(i, format!("C{i}"), Location::new(0.0, i as f64)))
            .collect();
        let ds = CityDataset::from_cities("Line", cities).expect("valid");
        let mut rng = StdRng::seed_from_u64(42);
        let route = Route::evaluate(
            RouteId::generate(&mut rng),
            RunId::generate(&mut rng),
            0,
            vec![0, 1, 2, 3],
            &ds,
        )
        .expect("valid");
        store.put(route.clone()).expect("put");
        route
    }

    fn lagging(lag: u32) -> LaggingStore {
        LaggingStore {
            inner: InMemoryRouteStore::new(),
            lag,
            calls: AtomicU32::new(0),
        }
    }

    #[test]
    fn test_retry_until_visible() {
        let store = lagging(2);
        let route = stored_route(&store);
        let found = fetch_with_retries(&store, &route.route_id(), 3, Duration::ZERO).expect("found");
        assert_eq!(found, route);
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_retries_exhausted() {
        let store = lagging(5);
        let route = stored_route(&store);
        let err = fetch_with_retries(&store, &route.route_id(), 3, Duration::ZERO).unwrap_err();
        assert_eq!(err, RoutingError::NotFound(Resource::Route(route.route_id())));
        assert_eq!(store.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_no_retries() {
        let store = lagging(0);
        let route = stored_route(&store);
        let found = fetch_with_retries(&store, &route.route_id(), 0, Duration::ZERO).expect("found");
        assert_eq!(found.route_id(), route.route_id());
    }

    #[test]
    fn test_default_put_batch() {
        let store = lagging(0);
        store.put_batch(Vec::new()).expect("empty batch");
        assert_eq!(store.inner.is_empty(), Ok(true));
    }
}
