//! Closed-tour distance evaluation.

use crate::error::{PathDefect, RoutingError};
use crate::models::CityDataset;

/// Computes the closed-tour length of `path` over `dataset`.
///
/// Sums `d(path[i], path[(i + 1) % len])` for every `i`, so the last city
/// connects back to the first.
///
/// # Errors
///
/// [`RoutingError::InvalidPath`] if `path` is not a permutation of the
/// dataset's city indices.
///
/// # Examples
///
/// ```
/// use tour_evolve::models::{City, CityDataset, Location};
/// use tour_evolve::distance::DistanceMatrix;
/// use tour_evolve::evaluation::total_distance;
///
/// let cities = (0..3).map(|i| City::new(i, "", Location::new(0.0, 0.0))).collect();
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 4.0],
///     vec![2.0, 4.0, 0.0],
/// ]).unwrap();
/// let dataset = CityDataset::new("Tri", cities, dm).unwrap();
///
/// // 0→1→2→0 = 1 + 4 + 2
/// assert!((total_distance(&[0, 1, 2], &dataset).unwrap() - 7.0).abs() < 1e-10);
/// assert!(total_distance(&[0, 1], &dataset).is_err());
/// ```
pub fn total_distance(path: &[usize], dataset: &CityDataset) -> Result<f64, RoutingError> {
    check_permutation(path, dataset.len())?;
    Ok(tour_length(path, dataset))
}

/// Checks that `path` visits each of the `size` cities exactly once.
///
/// Reports the first defect found.
pub fn check_permutation(path: &[usize], size: usize) -> Result<(), RoutingError> {
    if path.is_empty() {
        return Err(PathDefect::Empty.into());
    }
    let mut seen = vec![false; size];
    for &index in path {
        match seen.get_mut(index) {
            None => return Err(PathDefect::OutOfRange { index, size }.into()),
            Some(true) => return Err(PathDefect::Duplicate { index }.into()),
            Some(slot) => *slot = true,
        }
    }
    if path.len() != size {
        return Err(PathDefect::WrongLength {
            len: path.len(),
            size,
        }
        .into());
    }
    Ok(())
}

/// Closed-tour length without validation. Indices must be in range.
fn tour_length(path: &[usize], dataset: &CityDataset) -> f64 {
    let n = path.len();
    (0..n)
        .map(|i| dataset.distance(path[i], path[(i + 1) % n]))
        .sum()
}
