//! Recording and scripted doubles for the domain ports.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

use crate::domain::ports::{
    GeocodingError, GeocodingGateway, GeolocationError, GeolocationGateway,
    HazardSubmissionError, HazardSubmissionGateway, MapContainer, Notifier, PositionOptions,
    PositionSensor,
};
use crate::domain::{Coordinate, HazardReport, SearchResult};

/// Notifier that keeps every message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Error notices in delivery order.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Success notices in delivery order.
    #[must_use]
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }

    fn notify_success(&self, message: &str) {
        self.successes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

/// Map that keeps every re-centre request and marker.
#[derive(Debug, Default)]
pub struct RecordingMap {
    centred: Mutex<Vec<SearchResult>>,
    markers: Mutex<Vec<HazardReport>>,
}

impl RecordingMap {
    /// Results the map was centred on.
    #[must_use]
    pub fn centred(&self) -> Vec<SearchResult> {
        self.centred.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Hazards rendered as markers.
    #[must_use]
    pub fn markers(&self) -> Vec<HazardReport> {
        self.markers.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl MapContainer for RecordingMap {
    fn center_on(&self, result: &SearchResult) {
        self.centred
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
    }

    fn mark_hazard(&self, report: &HazardReport) {
        self.markers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
    }
}

/// Geolocation gateway answering from a script, then with a fixed error.
pub struct ScriptedGeolocation {
    scripted: Mutex<VecDeque<Result<Coordinate, GeolocationError>>>,
    calls: AtomicUsize,
}

impl ScriptedGeolocation {
    /// Answer calls with `scripted` in order.
    #[must_use]
    pub fn new(scripted: Vec<Result<Coordinate, GeolocationError>>) -> Self {
        Self {
            scripted: Mutex::new(scripted.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of position queries made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeolocationGateway for ScriptedGeolocation {
    async fn resolve_current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(GeolocationError::sensor_error("script exhausted")))
    }
}

/// Position sensor that never answers, as when a permission prompt is
/// ignored or no fix can be acquired.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPositionSensor;

#[async_trait]
impl PositionSensor for SilentPositionSensor {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        std::future::pending().await
    }
}

#[derive(Clone)]
struct BlockingControl {
    entered: mpsc::UnboundedSender<()>,
    release: Arc<Notify>,
}

/// Submission gateway answering from a script, optionally pausing each call
/// until released so tests can act while a submission is in flight.
pub struct ScriptedSubmissionGateway {
    scripted: Mutex<VecDeque<Result<(), HazardSubmissionError>>>,
    submitted: Mutex<Vec<HazardReport>>,
    blocking: Mutex<Option<BlockingControl>>,
}

impl ScriptedSubmissionGateway {
    /// Answer calls with `scripted` in order; extra calls succeed.
    #[must_use]
    pub fn new(scripted: Vec<Result<(), HazardSubmissionError>>) -> Self {
        Self {
            scripted: Mutex::new(scripted.into()),
            submitted: Mutex::new(Vec::new()),
            blocking: Mutex::new(None),
        }
    }

    /// Gateway that accepts everything.
    #[must_use]
    pub fn accepting() -> Self {
        Self::new(Vec::new())
    }

    /// Pause each call until `release` is notified. The receiver yields once
    /// per call that has entered the gateway.
    #[must_use]
    pub fn enable_blocking(&self) -> (mpsc::UnboundedReceiver<()>, Arc<Notify>) {
        let (entered_tx, entered_rx) = mpsc::unbounded_channel();
        let release = Arc::new(Notify::new());
        self.blocking
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(BlockingControl {
                entered: entered_tx,
                release: release.clone(),
            });
        (entered_rx, release)
    }

    /// Reports received, in order.
    #[must_use]
    pub fn submitted(&self) -> Vec<HazardReport> {
        self.submitted.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of submissions received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.submitted.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl HazardSubmissionGateway for ScriptedSubmissionGateway {
    async fn submit(&self, report: &HazardReport) -> Result<(), HazardSubmissionError> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());

        let blocking = self.blocking.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(BlockingControl { entered, release }) = blocking {
            entered.send(()).ok();
            release.notified().await;
        }

        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// Geocoder answering from a script and recording queries.
pub struct ScriptedGeocoder {
    scripted: Mutex<VecDeque<Result<SearchResult, GeocodingError>>>,
    queries: Mutex<Vec<String>>,
    blocking: Mutex<Option<BlockingControl>>,
}

impl ScriptedGeocoder {
    /// Answer calls with `scripted` in order; extra calls find nothing.
    #[must_use]
    pub fn new(scripted: Vec<Result<SearchResult, GeocodingError>>) -> Self {
        Self {
            scripted: Mutex::new(scripted.into()),
            queries: Mutex::new(Vec::new()),
            blocking: Mutex::new(None),
        }
    }

    /// Pause each call until `release` is notified.
    #[must_use]
    pub fn enable_blocking(&self) -> (mpsc::UnboundedReceiver<()>, Arc<Notify>) {
        let (entered_tx, entered_rx) = mpsc::unbounded_channel();
        let release = Arc::new(Notify::new());
        self.blocking
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(BlockingControl {
                entered: entered_tx,
                release: release.clone(),
            });
        (entered_rx, release)
    }

    /// Queries received, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl GeocodingGateway for ScriptedGeocoder {
    async fn search(&self, query: &str) -> Result<SearchResult, GeocodingError> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_owned());

        let blocking = self.blocking.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(BlockingControl { entered, release }) = blocking {
            entered.send(()).ok();
            release.notified().await;
        }

        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(GeocodingError::no_results()))
    }
}
