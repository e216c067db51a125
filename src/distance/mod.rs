//! Distance matrices.
//!
//! Provides the dense city-to-city distance matrix a dataset is scored on.

mod matrix;

pub use matrix::DistanceMatrix;
