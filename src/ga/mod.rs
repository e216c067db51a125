//! Evolutionary search over closed tours.
//!
//! - [`TwoOptMove`], [`mutate`]: 2-opt segment reversal, the only variation operator
//! - [`seed_generation`], [`advance_generation`]: one generational step
//! - [`BestOfRun`]: running minimum across generations
//! - [`EvolutionRunner`]: multi-generation driver over the [`store`](crate::store) contracts
//! - [`EvolutionConfig`]: run parameters

mod config;
mod generation;
mod mutation;
mod runner;

pub use config::{ConfigError, EvolutionConfig, MAX_CHILDREN_PER_PARENT};
pub use generation::{
    advance_generation, rank_by_distance, retain_below, seed_generation, BestOfRun, NO_THRESHOLD,
};
pub use mutation::{mutate, mutate_with, TwoOptMove, MIN_MUTABLE_LEN};
pub use runner::{EvolutionRunner, RunError, RunReport};
