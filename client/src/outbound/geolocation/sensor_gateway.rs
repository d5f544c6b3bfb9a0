//! Timeout-enforcing gateway over a device position sensor.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::Coordinate;
use crate::domain::ports::{GeolocationError, GeolocationGateway, PositionOptions, PositionSensor};

/// Geolocation gateway that queries a [`PositionSensor`] with high accuracy,
/// no cached fixes, and a fixed time budget.
pub struct SensorGeolocationGateway {
    sensor: Option<Arc<dyn PositionSensor>>,
    options: PositionOptions,
}

impl SensorGeolocationGateway {
    /// Wrap an available sensor.
    #[must_use]
    pub fn new(sensor: Arc<dyn PositionSensor>) -> Self {
        Self {
            sensor: Some(sensor),
            options: PositionOptions::default(),
        }
    }

    /// Gateway for a device without a position sensor; every query fails with
    /// [`GeolocationError::UnsupportedCapability`].
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            sensor: None,
            options: PositionOptions::default(),
        }
    }
}

#[async_trait]
impl GeolocationGateway for SensorGeolocationGateway {
    async fn resolve_current_position(&self) -> Result<Coordinate, GeolocationError> {
        let Some(sensor) = &self.sensor else {
            debug!("no position sensor available");
            return Err(GeolocationError::unsupported_capability());
        };

        timeout(self.options.timeout, sensor.current_position(&self.options))
            .await
            .unwrap_or_else(|_elapsed| {
                debug!(budget = ?self.options.timeout, "position query timed out");
                Err(GeolocationError::sensor_error(timeout_message(
                    self.options.timeout,
                )))
            })
    }
}

fn timeout_message(budget: Duration) -> String {
    format!(
        "Timed out waiting for the device position after {} ms",
        budget.as_millis()
    )
}

#[cfg(test)]
mod tests {
    //! Coverage for sensor option forwarding and timeout enforcement.

    use super::*;
    use crate::domain::ports::{MockPositionSensor, POSITION_TIMEOUT};
    use crate::test_support::doubles::SilentPositionSensor;
    use tokio::time::Instant;

    #[tokio::test]
    async fn forwards_fresh_high_accuracy_options_to_the_sensor() {
        let mut sensor = MockPositionSensor::new();
        sensor
            .expect_current_position()
            .withf(|options| {
                options.enable_high_accuracy
                    && options.maximum_age == Duration::ZERO
                    && options.timeout == POSITION_TIMEOUT
            })
            .times(1)
            .returning(|_| Ok(Coordinate::new(55.953_251, -3.188_267)));
        let gateway = SensorGeolocationGateway::new(Arc::new(sensor));

        let coordinate = gateway
            .resolve_current_position()
            .await
            .expect("sensor fix should pass through");

        assert_eq!(coordinate, Coordinate::new(55.953_251, -3.188_267));
    }

    #[tokio::test]
    async fn missing_sensor_reports_unsupported_capability() {
        let error = SensorGeolocationGateway::unsupported()
            .resolve_current_position()
            .await
            .expect_err("no sensor means no position");
        assert_eq!(error, GeolocationError::UnsupportedCapability);
    }

    #[tokio::test]
    async fn sensor_errors_keep_their_message() {
        let mut sensor = MockPositionSensor::new();
        sensor
            .expect_current_position()
            .returning(|_| Err(GeolocationError::sensor_error("User denied Geolocation")));
        let gateway = SensorGeolocationGateway::new(Arc::new(sensor));

        let error = gateway
            .resolve_current_position()
            .await
            .expect_err("denied permission should fail");
        assert_eq!(error.to_string(), "User denied Geolocation");
    }

    #[tokio::test(start_paused = true)]
    async fn silent_sensor_times_out_after_the_position_budget() {
        let gateway = SensorGeolocationGateway::new(Arc::new(SilentPositionSensor));
        let started = Instant::now();

        let error = gateway
            .resolve_current_position()
            .await
            .expect_err("silent sensor should time out");

        assert!(started.elapsed() >= POSITION_TIMEOUT);
        assert!(
            matches!(&error, GeolocationError::SensorError { message } if message.contains("5000 ms")),
            "timeout should surface as a sensor error, got {error:?}",
        );
    }
}
