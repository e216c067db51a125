//! # tour-evolve
//!
//! Evolutionary search for short closed tours through a fixed set of cities:
//! random seed tours, 2-opt mutation, threshold filtering and best-of-run
//! tracking, with storage behind small traits.
//!
//! ## Modules
//!
//! - [`models`]: cities, datasets, identifiers and routes
//! - [`distance`]: dense distance matrix
//! - [`evaluation`]: closed-tour distance and permutation checks
//! - [`constructive`]: random tour construction
//! - [`ga`]: mutation, generational step and run driver
//! - [`store`]: dataset and route store contracts, in-memory implementations
//! - [`error`]: error types
//!
//! ## Logging
//!
//! Spans and events are emitted through [`tracing`]. The crate never installs
//! a subscriber.

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod models;
pub mod store;
