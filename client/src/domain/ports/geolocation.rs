//! Driven ports for reading the device position.
//!
//! [`GeolocationGateway`] is what workflows depend on. [`PositionSensor`] is
//! the lower-level device capability a gateway adapter wraps; it may hang
//! forever, so the gateway owns the timeout budget.

use std::time::Duration;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Coordinate;

/// Time budget for one position query.
pub const POSITION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Query options passed to a [`PositionSensor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for the most precise fix the sensor can provide.
    pub enable_high_accuracy: bool,
    /// Give up after this long without a fix.
    pub timeout: Duration,
    /// Oldest cached fix the sensor may return; zero forces a fresh reading.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: POSITION_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

define_port_error! {
    /// Errors surfaced while resolving the device position.
    pub enum GeolocationError {
        /// The device has no location sensor.
        UnsupportedCapability =>
            "Geolocation is not supported by this device",
        /// The sensor produced no fix, for example after a timeout.
        SensorError {
            /// Sensor-provided reason.
            message: String,
        } => "{message}",
    }
}

/// Port for resolving the current device position.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeolocationGateway: Send + Sync {
    /// Query the device for a fresh, high-accuracy position.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let coordinate = gateway.resolve_current_position().await?;
    /// assert!(coordinate.latitude.is_finite());
    /// # Ok::<(), road_client::domain::ports::GeolocationError>(())
    /// ```
    async fn resolve_current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Device capability producing raw position fixes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionSensor: Send + Sync {
    /// Produce one fix honouring `options` as far as the hardware allows.
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinate, GeolocationError>;
}
