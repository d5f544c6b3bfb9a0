//! Driven port for persisting hazard reports.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::HazardReport;

define_port_error! {
    /// Errors surfaced while submitting a hazard report.
    ///
    /// Display output is the bare message so the workflow can show it to the
    /// user verbatim, falling back to a generic notice when it is blank.
    pub enum HazardSubmissionError {
        /// The request never produced a response.
        Transport {
            /// User-facing transport failure text.
            message: String,
        } => "{message}",
        /// The service answered with a non-success status.
        Rejected {
            /// HTTP status code returned by the service.
            status: u16,
            /// Backend-provided error text, possibly blank.
            message: String,
        } => "{message}",
    }
}

/// Port for handing a validated report to the hazard service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HazardSubmissionGateway: Send + Sync {
    /// Persist `report`. Success carries no payload; nothing is retried.
    async fn submit(&self, report: &HazardReport) -> Result<(), HazardSubmissionError>;
}
