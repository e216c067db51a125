//! Route and run identifiers.
//!
//! Both are opaque 128-bit values drawn from the caller's random source and
//! rendered as 32 lowercase hex characters.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! random_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(with = "uuid::serde::simple")] Uuid);

        impl $name {
            /// Mints a fresh identifier from 128 random bits.
            pub fn generate<R: Rng>(rng: &mut R) -> Self {
                Self(Uuid::from_u128(rng.random()))
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.simple())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

random_id!(
    /// Unique identifier of a single route.
    RouteId
);

random_id!(
    /// Identifier grouping every route of one evolutionary run.
    RunId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_display_is_hex() {
        let mut rng = StdRng::seed_from_u64(42);
        let id = RouteId::generate(&mut rng);
        let s = id.to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_parse_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = RunId::generate(&mut rng);
        let parsed: RunId = id.to_string().parse().expect("valid hex");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = RouteId::generate(&mut rng);
        let b = RouteId::generate(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_uses_hex_form() {
        let mut rng = StdRng::seed_from_u64(3);
        let id = RouteId::generate(&mut rng);
        let json = serde_json::to_string(&id).expect("serializes");
        assert_eq!(json, format!("\"{id}\""));
        let back: RouteId = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-an-id".parse::<RouteId>().is_err());
    }
}
