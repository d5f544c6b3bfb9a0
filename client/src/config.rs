//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{Coordinate, CoordinateError};

const DEFAULT_HAZARD_API_URL: &str = "http://localhost:5000";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
const DEFAULT_USER_AGENT: &str = "road-app/0.1";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Problems found while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A URL setting did not parse.
    #[error("invalid {key} `{value}`: {message}")]
    InvalidUrl {
        /// Setting name.
        key: &'static str,
        /// Raw configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// Only one of the device coordinates was configured.
    #[error("device_latitude and device_longitude must be configured together")]
    PartialDevicePosition,
    /// The configured device coordinates are not a valid position.
    #[error("invalid device position: {0}")]
    DevicePosition(#[from] CoordinateError),
}

/// Configuration values for the `road-app` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROAD_APP")]
pub struct RoadAppSettings {
    /// Base URL of the hazard service; reports go to `{base}/api/hazards`.
    pub hazard_api_url: Option<String>,
    /// Nominatim-compatible search endpoint.
    pub geocoder_url: Option<String>,
    /// `User-Agent` sent to the geocoder.
    pub user_agent: Option<String>,
    /// Per-request HTTP timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Latitude reported by the device position sensor.
    pub device_latitude: Option<f64>,
    /// Longitude reported by the device position sensor.
    pub device_longitude: Option<f64>,
    /// Emit JSON log lines instead of compact text.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl RoadAppSettings {
    /// Hazard service base URL, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the configured value does not
    /// parse.
    pub fn hazard_api_url(&self) -> Result<Url, ConfigError> {
        parse_url(
            "hazard_api_url",
            self.hazard_api_url.as_deref().unwrap_or(DEFAULT_HAZARD_API_URL),
        )
    }

    /// Geocoder search endpoint, falling back to public Nominatim.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the configured value does not
    /// parse.
    pub fn geocoder_url(&self) -> Result<Url, ConfigError> {
        parse_url(
            "geocoder_url",
            self.geocoder_url.as_deref().unwrap_or(DEFAULT_GEOCODER_URL),
        )
    }

    /// Return the configured user agent, falling back to the default.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Return the configured request timeout, falling back to the default.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    /// Position the device sensor reports, if one is configured.
    ///
    /// `None` means the device has no position sensor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PartialDevicePosition`] when only one
    /// coordinate is set and [`ConfigError::DevicePosition`] when the pair is
    /// out of range.
    pub fn device_position(&self) -> Result<Option<Coordinate>, ConfigError> {
        match (self.device_latitude, self.device_longitude) {
            (None, None) => Ok(None),
            (Some(latitude), Some(longitude)) => {
                Ok(Some(Coordinate::new(latitude, longitude).validated()?))
            }
            _ => Err(ConfigError::PartialDevicePosition),
        }
    }
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|error| ConfigError::InvalidUrl {
        key,
        value: value.to_owned(),
        message: error.to_string(),
    })
}
