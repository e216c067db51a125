//! City dataset: the fixed cities of one region and their distance matrix.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::DatasetError;

use super::City;

/// The cities of one region and the pairwise travel distances between them.
///
/// Validated on construction and read-only afterwards. `distance(i, j)` is
/// the travel distance from city `i` to city `j`; the diagonal is zero and
/// the matrix need not be symmetric.
///
/// # Examples
///
/// ```
/// use tour_evolve::models::{City, CityDataset, Location};
/// use tour_evolve::distance::DistanceMatrix;
///
/// let cities = vec![
///     City::new(0, "A", Location::new(0.0, 0.0)),
///     City::new(1, "B", Location::new(0.0, 1.0)),
/// ];
/// let distances = DistanceMatrix::from_rows(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).unwrap();
/// let dataset = CityDataset::new("Test", cities, distances).unwrap();
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.distance(1, 0), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct CityDataset {
    region: String,
    cities: Vec<City>,
    distances: DistanceMatrix,
}

/// Stored document shape: `{ region, cities, distances: [[..], ..] }`.
#[derive(Serialize, Deserialize)]
struct DatasetDocument {
    region: String,
    cities: Vec<City>,
    distances: Vec<Vec<f64>>,
}

impl CityDataset {
    /// Creates a dataset, validating city indices and the distance matrix.
    pub fn new(
        region: impl Into<String>,
        cities: Vec<City>,
        distances: DistanceMatrix,
    ) -> Result<Self, DatasetError> {
        validate_cities(&cities)?;
        validate_distances(&distances, cities.len())?;
        Ok(Self {
            region: region.into(),
            cities,
            distances,
        })
    }

    /// Creates a dataset whose distances are great-circle meters between the
    /// city locations.
    pub fn from_cities(region: impl Into<String>, cities: Vec<City>) -> Result<Self, DatasetError> {
        let distances = DistanceMatrix::from_cities(&cities);
        Self::new(region, cities, distances)
    }

    /// Parses a dataset document from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let doc: DatasetDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Reads a dataset document from a JSON stream.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let doc: DatasetDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    /// Serializes this dataset to the JSON document shape accepted by
    /// [`from_json_str`](Self::from_json_str).
    pub fn to_json_string(&self) -> Result<String, DatasetError> {
        let doc = DatasetDocument {
            region: self.region.clone(),
            cities: self.cities.clone(),
            distances: self.distances.rows().map(<[f64]>::to_vec).collect(),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    fn from_document(doc: DatasetDocument) -> Result<Self, DatasetError> {
        let expected = doc.cities.len();
        if doc.distances.len() != expected {
            return Err(DatasetError::SizeMismatch {
                rows: doc.distances.len(),
                cities: expected,
            });
        }
        if let Some((row, r)) = doc
            .distances
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != expected)
        {
            return Err(DatasetError::RaggedRow {
                row,
                len: r.len(),
                expected,
            });
        }
        let distances = DistanceMatrix::from_rows(doc.distances).ok_or(DatasetError::SizeMismatch {
            rows: expected,
            cities: expected,
        })?;
        Self::new(doc.region, doc.cities, distances)
    }

    /// Region name this dataset covers.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Cities in index order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Returns the city with the given index, if any.
    pub fn city(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Travel distance from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}

fn validate_cities(cities: &[City]) -> Result<(), DatasetError> {
    match cities
        .iter()
        .enumerate()
        .find(|(position, city)| city.index() != *position)
    {
        Some((position, city)) => Err(DatasetError::NonDenseIndex {
            position,
            index: city.index(),
        }),
        None => Ok(()),
    }
}

fn validate_distances(distances: &DistanceMatrix, n: usize) -> Result<(), DatasetError> {
    if distances.size() != n {
        return Err(DatasetError::SizeMismatch {
            rows: distances.size(),
            cities: n,
        });
    }
    for from in 0..n {
        for to in 0..n {
            let value = distances.get(from, to);
            if from == to && value != 0.0 {
                return Err(DatasetError::NonZeroDiagonal { index: from, value });
            }
            if !value.is_finite() || value < 0.0 {
                return Err(DatasetError::InvalidDistance { from, to, value });
            }
        }
    }
    Ok(())
}
