//! Hazard report workflow: form state, location resolution and submission.
//!
//! The workflow is an explicit `Idle`/`Submitting` state machine. Form edits,
//! the location-source choice and the in-flight flag live in one state value
//! that only the public operations mutate. The state mutex is never held
//! across an `.await`, so edits stay possible while a submission is pending.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use super::ports::{
    GeolocationError, GeolocationGateway, HazardSubmissionError, HazardSubmissionGateway,
    MapContainer, Notifier,
};
use super::{
    Coordinate, CoordinateError, FieldUpdate, FormField, FormFieldError, HazardForm, HazardReport,
    LocationSource, ValidationError,
};

/// Shown when a failure carries no message of its own.
pub const SUBMISSION_FALLBACK_MESSAGE: &str = "Failed to submit hazard report. Please try again.";
/// Confirmation shown after the hazard service accepts a report.
pub const SUBMISSION_SUCCESS_MESSAGE: &str = "Hazard reported successfully.";

/// Whether a submission is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// Ready to accept edits and a new submission.
    #[default]
    Idle,
    /// A submission is pending; further submits are dropped.
    Submitting,
}

/// Why a submission did not reach or pass the hazard service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HazardReportError {
    /// The device position could not be resolved.
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
    /// Local validation rejected the form before any submission call.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The hazard service call failed.
    #[error(transparent)]
    Submission(#[from] HazardSubmissionError),
}

impl From<CoordinateError> for HazardReportError {
    fn from(error: CoordinateError) -> Self {
        Self::Validation(error.into())
    }
}

impl HazardReportError {
    /// Message to show the user.
    ///
    /// Uses the error's own text, or [`SUBMISSION_FALLBACK_MESSAGE`] when that
    /// text is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use road_client::domain::ports::HazardSubmissionError;
    /// use road_client::domain::{HazardReportError, SUBMISSION_FALLBACK_MESSAGE};
    ///
    /// let silent = HazardReportError::from(HazardSubmissionError::transport(""));
    /// assert_eq!(silent.user_message(), SUBMISSION_FALLBACK_MESSAGE);
    /// ```
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            SUBMISSION_FALLBACK_MESSAGE.to_owned()
        } else {
            message
        }
    }

    /// Whether the failure was detected locally, before any submission call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result of one `submit` invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The service accepted the report and the form was reset.
    Submitted(HazardReport),
    /// The submission failed; the form was preserved and the user notified.
    Failed(HazardReportError),
    /// Another submission was already in flight; nothing happened.
    AlreadySubmitting,
}

/// Collaborators the hazard workflow drives.
pub struct HazardReportPorts {
    /// Device position source.
    pub geolocation: Arc<dyn GeolocationGateway>,
    /// Hazard persistence endpoint.
    pub submission: Arc<dyn HazardSubmissionGateway>,
    /// User-facing notices.
    pub notifier: Arc<dyn Notifier>,
    /// Map receiving submitted hazards as markers.
    pub map: Arc<dyn MapContainer>,
}

impl HazardReportPorts {
    /// Bundle the ports.
    #[must_use]
    pub const fn new(
        geolocation: Arc<dyn GeolocationGateway>,
        submission: Arc<dyn HazardSubmissionGateway>,
        notifier: Arc<dyn Notifier>,
        map: Arc<dyn MapContainer>,
    ) -> Self {
        Self {
            geolocation,
            submission,
            notifier,
            map,
        }
    }
}

#[derive(Debug, Default)]
struct WorkflowState {
    form: HazardForm,
    location_source: LocationSource,
    phase: SubmissionPhase,
    queued: Vec<FieldUpdate>,
}

/// Orchestrates editing and submitting one hazard report at a time.
pub struct HazardReportWorkflow {
    geolocation: Arc<dyn GeolocationGateway>,
    submission: Arc<dyn HazardSubmissionGateway>,
    notifier: Arc<dyn Notifier>,
    map: Arc<dyn MapContainer>,
    state: Mutex<WorkflowState>,
}

impl HazardReportWorkflow {
    /// Build an idle workflow with a default form and the device position as
    /// location source.
    #[must_use]
    pub fn new(ports: HazardReportPorts) -> Self {
        Self {
            geolocation: ports.geolocation,
            submission: ports.submission,
            notifier: ports.notifier,
            map: ports.map,
            state: Mutex::new(WorkflowState::default()),
        }
    }

    /// Snapshot of the visible form values.
    ///
    /// Edits queued during a submission are not part of the snapshot until
    /// the workflow is idle again.
    #[must_use]
    pub fn form(&self) -> HazardForm {
        lock(&self.state).form.clone()
    }

    /// Current location source.
    #[must_use]
    pub fn location_source(&self) -> LocationSource {
        lock(&self.state).location_source
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SubmissionPhase {
        lock(&self.state).phase
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase() == SubmissionPhase::Submitting
    }

    /// Set one form field from its raw text.
    ///
    /// While a submission is in flight the edit is queued and applied once
    /// the workflow returns to idle.
    ///
    /// # Errors
    ///
    /// Returns [`FormFieldError`] when a hazard type or severity name is not
    /// recognised; the form is left unchanged.
    pub fn update_field(&self, field: FormField, value: &str) -> Result<(), FormFieldError> {
        let update = FieldUpdate::parse(field, value)?;
        let mut state = lock(&self.state);
        if state.phase == SubmissionPhase::Submitting {
            debug!(?field, "queuing field edit until submission settles");
            state.queued.push(update);
        } else {
            state.form.apply(update);
        }
        Ok(())
    }

    /// Set a field addressed by its form name (`type`, `description`,
    /// `severity`, `latitude`, `longitude`).
    ///
    /// # Errors
    ///
    /// Returns [`FormFieldError::UnknownField`] for other names, plus the
    /// errors of [`HazardReportWorkflow::update_field`].
    pub fn update_named_field(&self, name: &str, value: &str) -> Result<(), FormFieldError> {
        self.update_field(name.parse()?, value)
    }

    /// Switch between device position and manual coordinates.
    ///
    /// Manual latitude/longitude text is kept across toggles.
    pub fn toggle_location_source(&self) -> LocationSource {
        let mut state = lock(&self.state);
        state.location_source = state.location_source.toggled();
        debug!(location_source = ?state.location_source, "location source toggled");
        state.location_source
    }

    /// Resolve a coordinate, validate, and submit the current form.
    ///
    /// Returns [`SubmissionOutcome::AlreadySubmitting`] without side effects
    /// when another submission is pending. Every failure is reported through
    /// the notifier and leaves the form untouched; success resets it.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// workflow.update_field(FormField::Description, "Deep pothole")?;
    /// match workflow.submit().await {
    ///     SubmissionOutcome::Submitted(report) => assert_eq!(report.description(), "Deep pothole"),
    ///     other => panic!("unexpected outcome: {other:?}"),
    /// }
    /// ```
    pub async fn submit(&self) -> SubmissionOutcome {
        let Some((in_flight, form, source)) = self.begin_submission() else {
            debug!("hazard submission already in flight; ignoring submit");
            return SubmissionOutcome::AlreadySubmitting;
        };

        let span = info_span!(
            "hazard_report.submit",
            submission_id = %Uuid::new_v4(),
            location_source = ?source,
        );
        let result = self
            .resolve_and_submit(&form, source)
            .instrument(span.clone())
            .await;

        span.in_scope(|| match result {
            Ok(report) => {
                in_flight.complete(Completion::Succeeded);
                info!(
                    latitude = report.latitude(),
                    longitude = report.longitude(),
                    "hazard report accepted"
                );
                self.map.mark_hazard(&report);
                self.notifier.notify_success(SUBMISSION_SUCCESS_MESSAGE);
                SubmissionOutcome::Submitted(report)
            }
            Err(error) => {
                in_flight.complete(Completion::Failed);
                warn!(%error, validation = error.is_validation(), "hazard submission failed");
                self.notifier.notify_error(&error.user_message());
                SubmissionOutcome::Failed(error)
            }
        })
    }

    fn begin_submission(&self) -> Option<(InFlight<'_>, HazardForm, LocationSource)> {
        let mut state = lock(&self.state);
        if state.phase == SubmissionPhase::Submitting {
            return None;
        }
        state.phase = SubmissionPhase::Submitting;
        let form = state.form.clone();
        let source = state.location_source;
        drop(state);

        Some((
            InFlight {
                state: &self.state,
                completion: Completion::Failed,
            },
            form,
            source,
        ))
    }

    async fn resolve_and_submit(
        &self,
        form: &HazardForm,
        source: LocationSource,
    ) -> Result<HazardReport, HazardReportError> {
        let coordinate = self.resolve_coordinate(form, source).await?;
        let report = form.to_report(coordinate)?;
        debug!(
            hazard_type = %report.hazard_type(),
            severity = %report.severity(),
            "submitting hazard report"
        );
        self.submission.submit(&report).await?;
        Ok(report)
    }

    async fn resolve_coordinate(
        &self,
        form: &HazardForm,
        source: LocationSource,
    ) -> Result<Coordinate, HazardReportError> {
        match source {
            LocationSource::CurrentDevicePosition => {
                Ok(self.geolocation.resolve_current_position().await?)
            }
            LocationSource::ManualCoordinates => {
                Ok(Coordinate::parse_text(&form.latitude, &form.longitude)?)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Succeeded,
    Failed,
}

/// Returns the workflow to idle when dropped, including when the submit
/// future itself is dropped mid-flight.
struct InFlight<'a> {
    state: &'a Mutex<WorkflowState>,
    completion: Completion,
}

impl InFlight<'_> {
    fn complete(mut self, completion: Completion) {
        self.completion = completion;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        if self.completion == Completion::Succeeded {
            state.form = HazardForm::default();
        }
        let queued = std::mem::take(&mut state.queued);
        for update in queued {
            state.form.apply(update);
        }
        state.phase = SubmissionPhase::Idle;
    }
}

/// Every mutation under the lock is a plain field write, so a poisoned guard
/// still holds a consistent state.
fn lock(state: &Mutex<WorkflowState>) -> MutexGuard<'_, WorkflowState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
