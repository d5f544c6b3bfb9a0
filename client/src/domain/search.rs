//! Geocoding result handed to the map.

use super::coordinate::Coordinate;

/// Top-ranked geocoding candidate for a free-text query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Human-readable place name from the geocoder.
    pub display_name: String,
}

impl SearchResult {
    /// Location of the result.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
