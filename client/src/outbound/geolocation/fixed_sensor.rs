//! Position sensor reporting a configured location.

use async_trait::async_trait;

use crate::domain::Coordinate;
use crate::domain::ports::{GeolocationError, PositionOptions, PositionSensor};

/// Sensor for hosts without positioning hardware whose location is known
/// ahead of time, such as a kiosk or a CLI configured with coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPositionSensor {
    coordinate: Coordinate,
}

impl FixedPositionSensor {
    /// Report `coordinate` on every query.
    #[must_use]
    pub const fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl PositionSensor for FixedPositionSensor {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        Ok(self.coordinate)
    }
}
