//! City and location types.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used for great-circle distances.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface, in decimal degrees.
///
/// # Examples
///
/// ```
/// use tour_evolve::models::Location;
///
/// let minneapolis = Location::new(44.98, -93.27);
/// let duluth = Location::new(46.79, -92.10);
/// let d = minneapolis.distance_to(&duluth);
/// assert!(d > 200_000.0 && d < 230_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle (haversine) distance to another location, in meters.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

/// A city in a dataset.
///
/// `index` is the dense 0-based identifier routes refer to; it equals the
/// city's position in its dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    index: usize,
    #[serde(rename = "cityName")]
    name: String,
    location: Location,
}

impl City {
    /// Creates a city.
    pub fn new(index: usize, name: impl Into<String>, location: Location) -> Self {
        Self {
            index,
            name: name.into(),
            location,
        }
    }

    /// Dense 0-based index within the owning dataset.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }
}
