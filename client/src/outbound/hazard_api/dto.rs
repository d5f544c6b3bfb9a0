//! Wire DTOs for the hazard service.

use serde::{Deserialize, Serialize};

use crate::domain::{HazardReport, HazardType, Severity};

/// JSON body of `POST /api/hazards`.
#[derive(Debug, Serialize)]
pub(super) struct HazardReportDto<'a> {
    #[serde(rename = "type")]
    pub(super) hazard_type: HazardType,
    pub(super) description: &'a str,
    pub(super) severity: Severity,
    pub(super) latitude: f64,
    pub(super) longitude: f64,
}

impl<'a> From<&'a HazardReport> for HazardReportDto<'a> {
    fn from(report: &'a HazardReport) -> Self {
        Self {
            hazard_type: report.hazard_type(),
            description: report.description(),
            severity: report.severity(),
            latitude: report.latitude(),
            longitude: report.longitude(),
        }
    }
}

/// Error envelope returned by the hazard service on 4xx/5xx.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) error: Option<String>,
}
