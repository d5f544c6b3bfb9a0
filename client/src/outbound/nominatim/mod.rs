//! Nominatim outbound adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `GeocodingGateway` port.

mod dto;
mod http_geocoder;

pub use http_geocoder::{NominatimGeocoder, NominatimIdentity};
