//! Reqwest-backed Nominatim geocoder.
//!
//! This adapter owns transport details only: query-string construction,
//! timeout and HTTP error mapping, and JSON decoding into `SearchResult`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::NominatimPlaceDto;
use crate::domain::SearchResult;
use crate::domain::ports::{GeocodingError, GeocodingGateway};
use crate::outbound::http_body::body_preview;

const DEFAULT_USER_AGENT: &str = "road-app/0.1";
/// Only the top-ranked candidate is ever used.
const RESULT_LIMIT: &str = "1";

/// Outbound identity sent with Nominatim requests.
///
/// The public Nominatim instance requires an identifying user agent.
pub struct NominatimIdentity {
    /// HTTP user-agent sent to Nominatim.
    pub user_agent: String,
}

impl Default for NominatimIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Geocoder adapter that performs HTTP GET searches against one endpoint.
pub struct NominatimGeocoder {
    client: Client,
    endpoint: Url,
    user_agent: String,
}

impl NominatimGeocoder {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(endpoint, timeout, NominatimIdentity::default())
    }

    /// Build an adapter with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        endpoint: Url,
        timeout: Duration,
        identity: NominatimIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            user_agent: identity.user_agent,
        })
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", RESULT_LIMIT);
        url
    }
}

#[async_trait]
impl GeocodingGateway for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<SearchResult, GeocodingError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(GeocodingError::invalid_query());
        }

        let response = self
            .client
            .get(self.search_url(trimmed))
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_top_candidate(body.as_ref())
    }
}

fn parse_top_candidate(body: &[u8]) -> Result<SearchResult, GeocodingError> {
    let candidates: Vec<NominatimPlaceDto> = serde_json::from_slice(body).map_err(|error| {
        GeocodingError::decode(format!("invalid Nominatim JSON payload: {error}"))
    })?;
    let top = candidates
        .into_iter()
        .next()
        .ok_or_else(GeocodingError::no_results)?;
    top.into_search_result().map_err(GeocodingError::decode)
}

fn map_transport_error(error: reqwest::Error) -> GeocodingError {
    debug!(%error, timeout = error.is_timeout(), "nominatim request failed");
    GeocodingError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GeocodingError {
    let preview = body_preview(body);
    if preview.is_empty() {
        GeocodingError::transport(format!("status {}", status.as_u16()))
    } else {
        GeocodingError::transport(format!("status {}: {preview}", status.as_u16()))
    }
}
