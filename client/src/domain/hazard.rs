//! Hazard report values and the editable form they are built from.
//!
//! `HazardType` and `Severity` serialise as their lowercase wire names, which
//! are also the names accepted by the form and the command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, CoordinateError};

/// Category of road hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardType {
    /// Hole or break in the road surface.
    #[default]
    Pothole,
    /// Road works narrowing or closing a lane.
    Construction,
    /// Collision blocking or slowing traffic.
    Accident,
    /// Standing water on the carriageway.
    Flooding,
    /// Objects lying on the road.
    Debris,
    /// Anything else worth reporting.
    Other,
}

impl HazardType {
    /// Every hazard type in display order.
    pub const ALL: [Self; 6] = [
        Self::Pothole,
        Self::Construction,
        Self::Accident,
        Self::Flooding,
        Self::Debris,
        Self::Other,
    ];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pothole => "pothole",
            Self::Construction => "construction",
            Self::Accident => "accident",
            Self::Flooding => "flooding",
            Self::Debris => "debris",
            Self::Other => "other",
        }
    }
}

/// How dangerous the hazard is to road users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor inconvenience.
    Low,
    /// Needs care when passing.
    #[default]
    Medium,
    /// Immediate danger.
    High,
}

impl Severity {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardType {
    type Err = FormFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormFieldError::UnknownHazardType {
                value: raw.to_owned(),
            })
    }
}

impl FromStr for Severity {
    type Err = FormFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        [Self::Low, Self::Medium, Self::High]
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| FormFieldError::UnknownSeverity {
                value: raw.to_owned(),
            })
    }
}

/// Errors raised while editing form fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormFieldError {
    /// The field name is not part of the hazard form.
    #[error("unknown form field: {name}")]
    UnknownField {
        /// Name that was supplied.
        name: String,
    },
    /// The hazard type is not one of the supported categories.
    #[error("unknown hazard type: {value}")]
    UnknownHazardType {
        /// Value that was supplied.
        value: String,
    },
    /// The severity is not `low`, `medium` or `high`.
    #[error("unknown severity: {value}")]
    UnknownSeverity {
        /// Value that was supplied.
        value: String,
    },
}

/// Validation failures detected locally before any gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The resolved coordinate is missing, non-numeric or out of range.
    #[error(transparent)]
    Coordinates(#[from] CoordinateError),
    /// The description is blank.
    #[error("Please describe the hazard before submitting.")]
    MissingDescription,
}

/// A hazard ready for submission.
///
/// Only constructible through [`HazardReport::new`], so every instance has a
/// non-blank description and a finite, in-range coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardReport {
    hazard_type: HazardType,
    description: String,
    severity: Severity,
    coordinate: Coordinate,
}

impl HazardReport {
    /// Build a validated report.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Coordinates`] when the coordinate fails
    /// [`Coordinate::validated`], and [`ValidationError::MissingDescription`]
    /// when the description is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use road_client::domain::{Coordinate, HazardReport, HazardType, Severity};
    ///
    /// let report = HazardReport::new(
    ///     HazardType::Flooding,
    ///     "Underpass under water",
    ///     Severity::High,
    ///     Coordinate::new(51.5, -0.12),
    /// )?;
    /// assert_eq!(report.latitude(), 51.5);
    /// # Ok::<(), road_client::domain::ValidationError>(())
    /// ```
    pub fn new(
        hazard_type: HazardType,
        description: impl Into<String>,
        severity: Severity,
        coordinate: Coordinate,
    ) -> Result<Self, ValidationError> {
        let checked = coordinate.validated()?;
        let text = description.into();
        if text.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        Ok(Self {
            hazard_type,
            description: text,
            severity,
            coordinate: checked,
        })
    }

    /// Hazard category.
    #[must_use]
    pub const fn hazard_type(&self) -> HazardType {
        self.hazard_type
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Hazard severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Reported location.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Reported latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    /// Reported longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }
}

/// Where the workflow takes the hazard coordinate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationSource {
    /// Ask the device for its current position.
    #[default]
    CurrentDevicePosition,
    /// Parse the latitude/longitude text fields of the form.
    ManualCoordinates,
}

impl LocationSource {
    /// The other source.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::CurrentDevicePosition => Self::ManualCoordinates,
            Self::ManualCoordinates => Self::CurrentDevicePosition,
        }
    }
}

/// Names of the editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// `type`
    HazardType,
    /// `description`
    Description,
    /// `severity`
    Severity,
    /// `latitude`
    Latitude,
    /// `longitude`
    Longitude,
}

impl FromStr for FormField {
    type Err = FormFieldError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "type" => Ok(Self::HazardType),
            "description" => Ok(Self::Description),
            "severity" => Ok(Self::Severity),
            "latitude" => Ok(Self::Latitude),
            "longitude" => Ok(Self::Longitude),
            other => Err(FormFieldError::UnknownField {
                name: other.to_owned(),
            }),
        }
    }
}

/// A parsed edit to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// New hazard type.
    HazardType(HazardType),
    /// New description text.
    Description(String),
    /// New severity.
    Severity(Severity),
    /// New manual latitude text.
    Latitude(String),
    /// New manual longitude text.
    Longitude(String),
}

impl FieldUpdate {
    /// Parse a raw value for `field`.
    ///
    /// Coordinate text is stored verbatim; it is only interpreted on submit.
    ///
    /// # Errors
    ///
    /// Returns [`FormFieldError`] when a hazard type or severity name is not
    /// recognised.
    pub fn parse(field: FormField, value: &str) -> Result<Self, FormFieldError> {
        Ok(match field {
            FormField::HazardType => Self::HazardType(value.parse()?),
            FormField::Description => Self::Description(value.to_owned()),
            FormField::Severity => Self::Severity(value.parse()?),
            FormField::Latitude => Self::Latitude(value.to_owned()),
            FormField::Longitude => Self::Longitude(value.to_owned()),
        })
    }
}

/// Current values of the hazard form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HazardForm {
    /// Selected hazard type.
    pub hazard_type: HazardType,
    /// Description text.
    pub description: String,
    /// Selected severity.
    pub severity: Severity,
    /// Manual latitude text.
    pub latitude: String,
    /// Manual longitude text.
    pub longitude: String,
}

impl HazardForm {
    /// Apply one parsed edit.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::HazardType(value) => self.hazard_type = value,
            FieldUpdate::Description(value) => self.description = value,
            FieldUpdate::Severity(value) => self.severity = value,
            FieldUpdate::Latitude(value) => self.latitude = value,
            FieldUpdate::Longitude(value) => self.longitude = value,
        }
    }

    /// Build a report from the form's type, description and severity.
    ///
    /// # Errors
    ///
    /// Propagates [`HazardReport::new`] validation failures.
    pub fn to_report(&self, coordinate: Coordinate) -> Result<HazardReport, ValidationError> {
        HazardReport::new(
            self.hazard_type,
            self.description.clone(),
            self.severity,
            coordinate,
        )
    }
}
