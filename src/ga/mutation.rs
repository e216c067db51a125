//! 2-opt segment reversal mutation.
//!
//! # Algorithm
//!
//! Pick a contiguous segment of the tour, read as a cycle, and reverse the
//! cities inside it. This removes two edges and reconnects the tour the only
//! other way that keeps a single cycle:
//!
//! ```text
//! before: … a → [b → … → c] → d …
//! after:  … a → [c → … → b] → d …
//! ```
//!
//! Segments wrap past the end of the path when needed; the reversal is done
//! in place on the circular positions, so cities outside the segment keep
//! their array positions.
//!
//! Segment lengths are drawn from `[2, n-1]`: length 0 or 1 changes nothing,
//! and reversing all `n` cities yields the same cycle. Tours of fewer than
//! four cities have no meaningful move and are rejected.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::Rng;

use crate::error::{PathDefect, RoutingError};
use crate::models::{CityDataset, Route, RouteId};

/// Fewest cities a tour needs before a 2-opt move is meaningful.
pub const MIN_MUTABLE_LEN: usize = 4;

/// A 2-opt move on a tour of `n` cities: reverse `len` consecutive positions
/// starting at `start`, wrapping around the end of the path.
///
/// # Examples
///
/// ```
/// use tour_evolve::ga::TwoOptMove;
///
/// let mv = TwoOptMove::new(1, 2, 4).unwrap();
/// assert_eq!(mv.apply(&[0, 1, 2, 3]).unwrap(), vec![0, 2, 1, 3]);
///
/// // Wraps: positions 3, 4, 0
/// let mv = TwoOptMove::new(3, 3, 5).unwrap();
/// assert_eq!(mv.apply(&[10, 11, 12, 13, 14]).unwrap(), vec![13, 11, 12, 10, 14]);
/// assert!(mv.apply(&[0, 1, 2, 3]).is_err());
///
/// assert!(TwoOptMove::new(0, 2, 3).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptMove {
    start: usize,
    len: usize,
    n: usize,
}

impl TwoOptMove {
    /// Creates a move for a tour of `n` cities.
    ///
    /// Returns `None` if `n < 4`, `start` is not in `[0, n)`, or `len` is not
    /// in `[2, n-1]`.
    pub fn new(start: usize, len: usize, n: usize) -> Option<Self> {
        if n < MIN_MUTABLE_LEN || start >= n || !(2..n).contains(&len) {
            return None;
        }
        Some(Self { start, len, n })
    }

    /// Draws a move uniformly: `start` from `[0, n)`, length from `[2, n-1]`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::TooShortToMutate`] if `n < 4`.
    pub fn sample<R: Rng>(n: usize, rng: &mut R) -> Result<Self, RoutingError> {
        ensure_mutable(n)?;
        let start = rng.random_range(0..n);
        let len = rng.random_range(2..n);
        Ok(Self { start, len, n })
    }

    /// First position of the reversed segment.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of positions reversed.
    pub fn segment_len(&self) -> usize {
        self.len
    }

    /// Tour size this move was built for.
    pub fn tour_len(&self) -> usize {
        self.n
    }

    /// Returns `path` with this move's segment reversed.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidPath`] with [`PathDefect::WrongLength`] if
    /// `path.len()` differs from [`tour_len`](Self::tour_len).
    pub fn apply(&self, path: &[usize]) -> Result<Vec<usize>, RoutingError> {
        if path.len() != self.n {
            return Err(PathDefect::WrongLength {
                len: path.len(),
                size: self.n,
            }
            .into());
        }
        let mut out = path.to_vec();
        for k in 0..self.len / 2 {
            let a = (self.start + k) % self.n;
            let b = (self.start + self.len - 1 - k) % self.n;
            out.swap(a, b);
        }
        Ok(out)
    }
}

fn ensure_mutable(n: usize) -> Result<(), RoutingError> {
    if n < MIN_MUTABLE_LEN {
        return Err(RoutingError::TooShortToMutate { len: n });
    }
    Ok(())
}

/// Produces one child of `parent` by a random 2-opt move.
///
/// The child keeps the parent's run, sits one generation later, gets a fresh
/// ID, and has its distance recomputed over `dataset`.
///
/// # Errors
///
/// - [`RoutingError::TooShortToMutate`] if the parent visits fewer than 4 cities.
/// - [`RoutingError::InvalidPath`] if the parent's path does not fit `dataset`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tour_evolve::models::{City, CityDataset, Location, Route, RouteId, RunId};
/// use tour_evolve::ga::mutate;
///
/// let cities = (0..6)
///     .map(|i| City::new(i, format!("C{i}"), Location::new(0.0, i as f64)))
///     .collect();
/// let dataset = CityDataset::from_cities("Line", cities).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let parent = Route::evaluate(
///     RouteId::generate(&mut rng),
///     RunId::generate(&mut rng),
///     3,
///     vec![0, 1, 2, 3, 4, 5],
///     &dataset,
/// ).unwrap();
///
/// let child = mutate(&parent, &dataset, &mut rng).unwrap();
/// assert_eq!(child.generation(), 4);
/// assert_eq!(child.run_id(), parent.run_id());
/// assert_ne!(child.route_id(), parent.route_id());
/// ```
pub fn mutate<R: Rng>(
    parent: &Route,
    dataset: &CityDataset,
    rng: &mut R,
) -> Result<Route, RoutingError> {
    let mv = TwoOptMove::sample(parent.len(), rng)?;
    mutate_with(parent, mv, dataset, rng)
}

/// Produces the child of `parent` obtained by applying `mv`.
///
/// `rng` is only used to mint the child's ID.
///
/// # Errors
///
/// - [`RoutingError::TooShortToMutate`] if the parent has fewer than 4 cities.
/// - [`RoutingError::InvalidPath`] if `mv` was built for a tour size other
///   than `parent.len()`, or the child path does not fit `dataset`.
pub fn mutate_with<R: Rng>(
    parent: &Route,
    mv: TwoOptMove,
    dataset: &CityDataset,
    rng: &mut R,
) -> Result<Route, RoutingError> {
    ensure_mutable(parent.len())?;
    let path = mv.apply(parent.path())?;
    Route::evaluate(
        RouteId::generate(rng),
        parent.run_id(),
        parent.generation() + 1,
        path,
        dataset,
    )
}
