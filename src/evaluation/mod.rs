//! Route fitness evaluation.
//!
//! Fitness is the closed-tour distance of a path; lower is better.

mod fitness;

pub use fitness::{check_permutation, total_distance};
