//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod geocoding;
mod geolocation;
mod hazard_submission;
mod map_container;
mod notifier;

#[cfg(test)]
pub use geocoding::MockGeocodingGateway;
pub use geocoding::{GeocodingError, GeocodingGateway};
#[cfg(test)]
pub use geolocation::{MockGeolocationGateway, MockPositionSensor};
pub use geolocation::{
    GeolocationError, GeolocationGateway, POSITION_TIMEOUT, PositionOptions, PositionSensor,
};
#[cfg(test)]
pub use hazard_submission::MockHazardSubmissionGateway;
pub use hazard_submission::{HazardSubmissionError, HazardSubmissionGateway};
#[cfg(test)]
pub use map_container::MockMapContainer;
pub use map_container::MapContainer;
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::Notifier;
