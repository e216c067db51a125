//! Property tests for tour construction, mutation and generation filtering.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tour_evolve::constructive::random_route;
use tour_evolve::error::RoutingError;
use tour_evolve::evaluation::{check_permutation, total_distance};
use tour_evolve::ga::{advance_generation, mutate, seed_generation, TwoOptMove, NO_THRESHOLD};
use tour_evolve::models::{City, CityDataset, Location, RunId};

fn scattered(n: usize, seed: u64) -> CityDataset {
    use rand::Rng;
    let mut rng = StdRng::seed_from_u64(seed);
    let cities = (0..n)
        .map(|i| {
            let lat = rng.random_range(44.0..48.0);
            let lon = rng.random_range(-96.0..-90.0);
            City::new(i, format!("City {i}"), Location::new(lat, lon))
        })
        .collect();
    CityDataset::from_cities("Scattered", cities).expect("valid")
}

fn sorted(path: &[usize]) -> Vec<usize> {
    let mut v = path.to_vec();
    v.sort_unstable();
    v
}

proptest! {
    /// Property: random routes are permutations of the dataset's cities.
    #[test]
    fn prop_random_route_is_permutation(n in 1usize..40, seed in 0u64..5000) {
        let ds = scattered(n, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let path = random_route(&ds, &mut rng);
        prop_assert_eq!(sorted(&path), (0..n).collect::<Vec<_>>());
    }

    /// Property: a move reverses exactly `len` circular positions and keeps
    /// the multiset of cities.
    #[test]
    fn prop_move_preserves_cities(n in 4usize..40, seed in 0u64..5000) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mv = TwoOptMove::sample(n, &mut rng).expect("n >= 4");
        prop_assert!(mv.start() < n);
        prop_assert!((2..n).contains(&mv.segment_len()));

        let path: Vec<usize> = (0..n).rev().collect();
        let child = mv.apply(&path).expect("same size");
        prop_assert_eq!(sorted(&child), sorted(&path));

        for k in 0..n {
            let offset = (k + n - mv.start()) % n;
            if offset >= mv.segment_len() {
                prop_assert_eq!(child[k], path[k]);
            } else {
                let mirror = (mv.start() + mv.segment_len() - 1 - offset) % n;
                prop_assert_eq!(child[k], path[mirror]);
            }
        }
    }

    /// Property: a mutated child is a valid tour one generation later, scored
    /// with the same function as its parent.
    #[test]
    fn prop_mutation_consistent(n in 4usize..30, seed in 0u64..5000) {
        let ds = scattered(n, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let parents = seed_generation(&ds, RunId::generate(&mut rng), 1, &mut rng).expect("valid");
        let child = mutate(&parents[0], &ds, &mut rng).expect("mutable");

        prop_assert!(check_permutation(child.path(), n).is_ok());
        prop_assert_eq!(child.generation(), parents[0].generation() + 1);
        prop_assert_eq!(child.run_id(), parents[0].run_id());
        prop_assert_ne!(child.route_id(), parents[0].route_id());
        prop_assert_eq!(total_distance(child.path(), &ds), Ok(child.distance()));
    }

    /// Property: advancing keeps only children under the threshold, sorted.
    #[test]
    fn prop_advance_bounded_and_sorted(
        n in 4usize..20,
        parents in 1usize..5,
        children in 0usize..6,
        seed in 0u64..5000,
    ) {
        let ds = scattered(n, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let run_id = RunId::generate(&mut rng);
        let parents = seed_generation(&ds, run_id, parents, &mut rng).expect("valid");
        let threshold = parents
            .iter()
            .map(|p| p.distance())
            .fold(f64::NEG_INFINITY, f64::max);

        let kept = advance_generation(&parents, children, threshold, &ds, &mut rng).expect("valid");
        prop_assert!(kept.len() <= parents.len() * children);
        prop_assert!(kept.iter().all(|c| c.distance() < threshold));
        prop_assert!(kept.windows(2).all(|w| w[0].distance() <= w[1].distance()));

        let all = advance_generation(&parents, children, NO_THRESHOLD, &ds, &mut rng).expect("valid");
        prop_assert_eq!(all.len(), parents.len() * children);
    }

    /// Property: tours under four cities cannot be mutated.
    #[test]
    fn prop_short_tours_rejected(n in 1usize..4, seed in 0u64..5000) {
        let ds = scattered(n, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let parents = seed_generation(&ds, RunId::generate(&mut rng), 1, &mut rng).expect("valid");
        prop_assert_eq!(
            mutate(&parents[0], &ds, &mut rng),
            Err(RoutingError::TooShortToMutate { len: n })
        );
    }
}
