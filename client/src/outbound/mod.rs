//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **geolocation**: timeout-enforcing gateway over a position sensor
//! - **nominatim**: OpenStreetMap Nominatim geocoder over HTTP
//! - **hazard_api**: hazard submission client for the road hazard service
//!
//! Adapters are thin translators between domain types and transport
//! representations. They contain no workflow logic.

pub mod geolocation;
pub mod hazard_api;
pub mod nominatim;

mod http_body;
