//! Domain model types.
//!
//! Cities and their locations, the read-only dataset a run is scored
//! against, identifiers, and routes as scored permutations of cities.

mod city;
mod dataset;
mod ids;
mod route;

pub use city::{City, Location};
pub use dataset::CityDataset;
pub use ids::{RouteId, RunId};
pub use route::{Route, RouteSummary};
