//! Road hazard reporting client.
//!
//! The crate is split the hexagonal way: [`domain`] holds the workflows and
//! the ports they drive, [`outbound`] implements those ports over HTTP and
//! device sensors, and [`inbound`] exposes the workflows on the command line.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ConfigError, RoadAppSettings};
