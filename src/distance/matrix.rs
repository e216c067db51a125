//! Dense distance matrix.

use crate::models::City;

/// A dense n×n distance matrix stored in row-major order.
///
/// Entry `(i, j)` is the travel distance from city `i` to city `j`. The matrix
/// may be asymmetric.
///
/// # Examples
///
/// ```
/// use tour_evolve::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 7.0],
///     vec![5.0, 0.0, 2.0],
///     vec![6.0, 2.0, 0.0],
/// ])
/// .expect("square");
/// assert_eq!(dm.size(), 3);
/// assert!((dm.get(0, 2) - 7.0).abs() < 1e-10);
/// assert_ne!(dm.get(0, 2), dm.get(2, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes great-circle distances (meters) between city locations.
    pub fn from_cities(cities: &[City]) -> Self {
        let n = cities.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].location().distance_to(&cities[j].location());
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Returns `None` if any row length differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Returns the distance from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from city `from` to city `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of cities in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterates over the rows in city order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0, and an empty matrix has no rows anyway.
        self.data.chunks_exact(self.size.max(1))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    #[test]
    fn test_from_cities() {
        let cities = vec![
            City::new(0, "Null Island", Location::new(0.0, 0.0)),
            City::new(1, "One East", Location::new(0.0, 1.0)),
        ];
        let dm = DistanceMatrix::from_cities(&cities);
        assert_eq!(dm.size(), 2);
        assert!((dm.get(0, 0)).abs() < 1e-10);
        // One degree of longitude on the equator.
        assert!((dm.get(0, 1) - 111_194.93).abs() < 1.0);
        assert_eq!(dm.get(0, 1), dm.get(1, 0));
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_none());
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![vec![0.0, 3.0], vec![4.0, 0.0]];
        let dm = DistanceMatrix::from_rows(rows.clone()).expect("square");
        let back: Vec<Vec<f64>> = dm.rows().map(|r| r.to_vec()).collect();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_empty_has_no_rows() {
        let dm = DistanceMatrix::new(0);
        assert_eq!(dm.rows().count(), 0);
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert_eq!(dm.get(0, 1), 10.0);
        assert_eq!(dm.get(1, 0), 15.0);
    }
}
