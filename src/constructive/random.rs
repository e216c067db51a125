//! Uniform random tour construction.
//!
//! Shuffles the identity ordering with Fisher–Yates, so every permutation of
//! the dataset's cities is equally likely. O(n).

use rand::Rng;

use crate::models::CityDataset;

/// Returns the dataset's city indices in uniformly random order.
///
/// Each call builds its own buffer; nothing is shared between calls.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tour_evolve::models::{City, CityDataset, Location};
/// use tour_evolve::constructive::random_route;
///
/// let cities = (0..5)
///     .map(|i| City::new(i, format!("C{i}"), Location::new(0.0, i as f64)))
///     .collect();
/// let dataset = CityDataset::from_cities("Line", cities).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut path = random_route(&dataset, &mut rng);
/// path.sort();
/// assert_eq!(path, vec![0, 1, 2, 3, 4]);
/// ```
pub fn random_route<R: Rng>(dataset: &CityDataset, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..dataset.len()).collect();

    for i in (1..perm.len()).rev() {
        let j = rng.random_range(0..=i);
        perm.swap(i, j);
    }

    perm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{City, Location};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn dataset(n: usize) -> CityDataset {
        let cities = (0..n)
            .map(|i| City::new(i, format!("C{i}"), Location::new(45.0, -93.0 + i as f64)))
            .collect();
        CityDataset::from_cities("Test", cities).expect("valid")
    }

    #[test]
    fn test_is_permutation() {
        let ds = dataset(12);
        let mut rng = StdRng::seed_from_u64(42);
        let mut path = random_route(&ds, &mut rng);
        assert_eq!(path.len(), 12);
        path.sort();
        assert_eq!(path, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_and_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(random_route(&dataset(1), &mut rng), vec![0]);
        assert!(random_route(&dataset(0), &mut rng).is_empty());
    }

    #[test]
    fn test_independent_calls() {
        let ds = dataset(10);
        let mut rng = StdRng::seed_from_u64(7);
        let a = random_route(&ds, &mut rng);
        let b = random_route(&ds, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_roughly_uniform() {
        // 3 cities: 6 permutations, each expected 1000 times out of 6000.
        let ds = dataset(3);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..6000 {
            *counts.entry(random_route(&ds, &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, count) in &counts {
            assert!(
                (850..=1150).contains(count),
                "permutation {perm:?} drawn {count} times"
            );
        }
    }
}
