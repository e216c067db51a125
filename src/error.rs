//! Error types.
//!
//! [`RoutingError`] is the closed set of failures the engine reports. Callers
//! branch on the variant, never on the message text.

use std::fmt;

use crate::models::RouteId;

/// A resource that could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A city dataset, by region name.
    Region(String),
    /// A stored route, by ID.
    Route(RouteId),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Region(region) => write!(f, "no city dataset for region {region:?}"),
            Self::Route(id) => write!(f, "no route found with ID {id}"),
        }
    }
}

/// The first defect found in a path that should be a permutation of `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDefect {
    /// The path visits no cities.
    Empty,
    /// A city index is not in `[0, size)`.
    OutOfRange { index: usize, size: usize },
    /// A city index appears more than once.
    Duplicate { index: usize },
    /// The path does not visit every city exactly once.
    WrongLength { len: usize, size: usize },
}

impl fmt::Display for PathDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "path is empty"),
            Self::OutOfRange { index, size } => {
                write!(f, "city index {index} is outside [0, {size})")
            }
            Self::Duplicate { index } => write!(f, "city index {index} appears more than once"),
            Self::WrongLength { len, size } => {
                write!(f, "path visits {len} cities, dataset has {size}")
            }
        }
    }
}

/// Errors raised by route evaluation, mutation, generation management and
/// the store contracts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    #[error("{0}")]
    NotFound(Resource),
    #[error("invalid path: {0}")]
    InvalidPath(PathDefect),
    #[error("path of length {len} too short to mutate")]
    TooShortToMutate { len: usize },
    #[error("cannot advance a generation without parent routes")]
    EmptyParentSet,
    /// A store implementation failed for reasons of its own.
    #[error("store failure: {0}")]
    Store(String),
}

impl From<PathDefect> for RoutingError {
    fn from(defect: PathDefect) -> Self {
        Self::InvalidPath(defect)
    }
}

/// Errors raised while building a [`CityDataset`](crate::models::CityDataset).
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to parse city dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read city dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("city at position {position} has index {index}")]
    NonDenseIndex { position: usize, index: usize },
    #[error("distance matrix has {rows} rows for {cities} cities")]
    SizeMismatch { rows: usize, cities: usize },
    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("distance from city {index} to itself is {value}, expected 0")]
    NonZeroDiagonal { index: usize, value: f64 },
    #[error("distance from city {from} to city {to} is {value}")]
    InvalidDistance { from: usize, to: usize, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RoutingError::TooShortToMutate { len: 3 };
        assert_eq!(err.to_string(), "path of length 3 too short to mutate");

        let err = RoutingError::from(PathDefect::Duplicate { index: 4 });
        assert_eq!(
            err.to_string(),
            "invalid path: city index 4 appears more than once"
        );

        let err = RoutingError::NotFound(Resource::Region("Atlantis".into()));
        assert_eq!(err.to_string(), "no city dataset for region \"Atlantis\"");
    }

    #[test]
    fn test_branch_on_kind() {
        let err: RoutingError = PathDefect::Empty.into();
        assert!(matches!(err, RoutingError::InvalidPath(PathDefect::Empty)));
    }
}
