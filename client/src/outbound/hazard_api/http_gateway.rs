//! Reqwest-backed hazard submission client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{ErrorBodyDto, HazardReportDto};
use crate::domain::HazardReport;
use crate::domain::ports::{HazardSubmissionError, HazardSubmissionGateway};
use crate::outbound::http_body::body_preview;

const HAZARDS_PATH: &str = "api/hazards";

/// Errors raised while building the submission client.
#[derive(Debug, thiserror::Error)]
pub enum HazardApiSetupError {
    /// The base URL cannot be extended with the hazards path.
    #[error("invalid hazard service URL: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The HTTP client could not be constructed.
    #[error("failed to build hazard service HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Submission gateway that POSTs JSON reports to `{api_base}/api/hazards`.
pub struct HttpHazardSubmissionGateway {
    client: Client,
    endpoint: Url,
}

impl HttpHazardSubmissionGateway {
    /// Build a client for the service rooted at `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`HazardApiSetupError`] when the endpoint URL cannot be derived
    /// or the reqwest client cannot be constructed.
    pub fn new(api_base: &Url, timeout: Duration) -> Result<Self, HazardApiSetupError> {
        let endpoint = hazards_endpoint(api_base)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Fully resolved submission URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl HazardSubmissionGateway for HttpHazardSubmissionGateway {
    async fn submit(&self, report: &HazardReport) -> Result<(), HazardSubmissionError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&HazardReportDto::from(report))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "hazard service accepted report");
            return Ok(());
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

/// Append the hazards path, keeping any path prefix on `api_base`.
fn hazards_endpoint(api_base: &Url) -> Result<Url, url::ParseError> {
    let mut base = api_base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(HAZARDS_PATH)
}

fn map_transport_error(error: reqwest::Error) -> HazardSubmissionError {
    debug!(%error, timeout = error.is_timeout(), "hazard service request failed");
    HazardSubmissionError::transport(format!("Could not reach the hazard service: {error}"))
}

/// Prefer the service's own `error` text; it may be blank, in which case the
/// workflow substitutes its fallback notice.
fn map_status_error(status: StatusCode, body: &[u8]) -> HazardSubmissionError {
    if let Ok(ErrorBodyDto {
        error: Some(message),
    }) = serde_json::from_slice::<ErrorBodyDto>(body)
    {
        return HazardSubmissionError::rejected(status.as_u16(), message);
    }

    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("Hazard service responded with status {}", status.as_u16())
    } else {
        format!(
            "Hazard service responded with status {}: {preview}",
            status.as_u16()
        )
    };
    HazardSubmissionError::rejected(status.as_u16(), message)
}
