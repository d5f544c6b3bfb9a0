//! Driven port for turning a place name into a coordinate.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::SearchResult;

define_port_error! {
    /// Errors surfaced while geocoding a query.
    pub enum GeocodingError {
        /// The query was blank; no request was made.
        InvalidQuery =>
            "search query must not be empty",
        /// The service answered with zero candidates.
        NoResults =>
            "no places matched the search query",
        /// Network transport failed or the service returned an error status.
        Transport {
            /// Transport or status detail.
            message: String,
        } => "geocoding transport failed: {message}",
        /// The service response could not be decoded.
        Decode {
            /// Decoder detail.
            message: String,
        } => "geocoding response decode failed: {message}",
    }
}

/// Port for geocoding free-text queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingGateway: Send + Sync {
    /// Return the top-ranked candidate for `query`.
    ///
    /// Implementations reject blank queries with
    /// [`GeocodingError::InvalidQuery`] before touching the network.
    async fn search(&self, query: &str) -> Result<SearchResult, GeocodingError>;
}
