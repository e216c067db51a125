//! Constructive heuristics for building initial tours.
//!
//! - [`random_route`]: uniform random permutation (Fisher-Yates), O(n)

mod random;

pub use random::random_route;
