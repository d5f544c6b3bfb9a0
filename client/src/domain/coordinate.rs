//! WGS84 coordinate value and its validation rules.

use std::fmt;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A latitude/longitude pair in WGS84 degrees.
///
/// Construction does not validate; call [`Coordinate::validated`] before the
/// value crosses into a hazard report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Reasons a coordinate is rejected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// One of the components is missing, not a number, or not finite.
    #[error("Invalid coordinates. Please check your input or allow location access.")]
    NotNumeric,
    /// Both components are numbers but at least one lies outside WGS84 bounds.
    #[error(
        "Coordinates out of range. Latitude must be within [-90, 90] and longitude within [-180, 180]."
    )]
    OutOfRange,
}

impl Coordinate {
    /// Build a coordinate from raw components.
    ///
    /// # Examples
    ///
    /// ```
    /// use road_client::domain::Coordinate;
    ///
    /// let paris = Coordinate::new(48.8566, 2.3522);
    /// assert_eq!(paris.latitude, 48.8566);
    /// ```
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse manually entered text into a coordinate.
    ///
    /// Surrounding whitespace is ignored. Blank or non-numeric text yields
    /// [`CoordinateError::NotNumeric`]; the result still needs
    /// [`Coordinate::validated`] to reject `NaN`, infinities and out-of-range
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::NotNumeric`] when either field does not
    /// parse as a real number.
    ///
    /// # Examples
    ///
    /// ```
    /// use road_client::domain::{Coordinate, CoordinateError};
    ///
    /// let parsed = Coordinate::parse_text(" 51.5 ", "-0.12")?;
    /// assert_eq!(parsed, Coordinate::new(51.5, -0.12));
    /// assert_eq!(
    ///     Coordinate::parse_text("abc", "1"),
    ///     Err(CoordinateError::NotNumeric)
    /// );
    /// # Ok::<(), CoordinateError>(())
    /// ```
    pub fn parse_text(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        Ok(Self::new(parse_component(latitude)?, parse_component(longitude)?))
    }

    /// Return the coordinate when both components are finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::NotNumeric`] for `NaN` or infinite
    /// components, and [`CoordinateError::OutOfRange`] for values outside
    /// [`LATITUDE_RANGE`] or [`LONGITUDE_RANGE`].
    pub fn validated(self) -> Result<Self, CoordinateError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoordinateError::NotNumeric);
        }
        if !LATITUDE_RANGE.contains(&self.latitude) || !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(CoordinateError::OutOfRange);
        }
        Ok(self)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

fn parse_component(raw: &str) -> Result<f64, CoordinateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoordinateError::NotNumeric);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| CoordinateError::NotNumeric)
}
