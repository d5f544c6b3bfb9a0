//! Hazard service outbound adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `HazardSubmissionGateway` port.

mod dto;
mod http_gateway;

pub use http_gateway::{HazardApiSetupError, HttpHazardSubmissionGateway};
