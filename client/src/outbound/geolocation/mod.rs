//! Geolocation adapters.
//!
//! `SensorGeolocationGateway` implements the `GeolocationGateway` port over
//! any `PositionSensor`, enforcing the position timeout itself.

mod fixed_sensor;
mod sensor_gateway;

pub use fixed_sensor::FixedPositionSensor;
pub use sensor_gateway::SensorGeolocationGateway;
