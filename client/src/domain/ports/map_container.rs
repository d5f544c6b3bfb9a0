//! Driven port for the map that displays results and hazards.

use crate::domain::{HazardReport, SearchResult};

/// Receives coordinates from both workflows.
#[cfg_attr(test, mockall::automock)]
pub trait MapContainer: Send + Sync {
    /// Re-centre the map on a search result.
    fn center_on(&self, result: &SearchResult);

    /// Render a freshly submitted hazard as a marker.
    fn mark_hazard(&self, report: &HazardReport);
}
