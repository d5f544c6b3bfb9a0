//! Domain primitives, ports and workflows.
//!
//! Purpose: hold everything that decides *what* happens when a user reports a
//! hazard or searches for a place, independent of how positions are sensed,
//! how HTTP is spoken, or how notices are displayed.
//!
//! Public surface:
//! - `Coordinate` and `CoordinateError`: WGS84 pair and its validation.
//! - `HazardReport`, `HazardForm`, `HazardType`, `Severity`: report values
//!   and the editable form they are built from.
//! - `SearchResult`: top geocoding candidate.
//! - `HazardReportWorkflow` and `LocationSearchWorkflow`: the two
//!   user-facing state machines.

pub mod coordinate;
pub mod hazard;
pub mod hazard_report_workflow;
pub mod location_search_workflow;
pub mod ports;
pub mod search;

pub use self::coordinate::{Coordinate, CoordinateError};
pub use self::hazard::{
    FieldUpdate, FormField, FormFieldError, HazardForm, HazardReport, HazardType, LocationSource,
    Severity, ValidationError,
};
pub use self::hazard_report_workflow::{
    HazardReportError, HazardReportPorts, HazardReportWorkflow, SUBMISSION_FALLBACK_MESSAGE,
    SUBMISSION_SUCCESS_MESSAGE, SubmissionOutcome, SubmissionPhase,
};
pub use self::location_search_workflow::{
    LocationSearchWorkflow, NO_RESULTS_MESSAGE, SEARCH_FAILED_MESSAGE, SearchOutcome,
};
pub use self::search::SearchResult;
