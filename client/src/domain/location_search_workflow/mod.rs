//! Place search workflow: query state and result propagation to the map.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use super::SearchResult;
use super::ports::{GeocodingError, GeocodingGateway, MapContainer, Notifier};

/// Shown when the geocoder finds nothing for the query.
pub const NO_RESULTS_MESSAGE: &str = "No results found. Please try a different search term.";
/// Shown for every other geocoding failure.
pub const SEARCH_FAILED_MESSAGE: &str = "Error searching for location. Please try again.";

/// Result of one `search` invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The map was re-centred on this result.
    Found(SearchResult),
    /// The geocoder had no candidates; the user was told so.
    NoResults,
    /// The geocoder call failed; the user was told so.
    Failed(GeocodingError),
    /// The query was blank or a search was already running.
    Skipped,
}

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    is_submitting: bool,
}

/// Orchestrates one search box.
pub struct LocationSearchWorkflow {
    geocoder: Arc<dyn GeocodingGateway>,
    notifier: Arc<dyn Notifier>,
    map: Arc<dyn MapContainer>,
    state: Mutex<SearchState>,
}

impl LocationSearchWorkflow {
    /// Build a workflow with an empty query.
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn GeocodingGateway>,
        notifier: Arc<dyn Notifier>,
        map: Arc<dyn MapContainer>,
    ) -> Self {
        Self {
            geocoder,
            notifier,
            map,
            state: Mutex::new(SearchState::default()),
        }
    }

    /// Replace the pending query text. No validation happens here.
    pub fn set_query(&self, query: impl Into<String>) {
        lock(&self.state).query = query.into();
    }

    /// Pending query text.
    #[must_use]
    pub fn query(&self) -> String {
        lock(&self.state).query.clone()
    }

    /// Whether a search is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        lock(&self.state).is_submitting
    }

    /// Geocode the pending query and re-centre the map on the top result.
    ///
    /// Blank queries and searches started while another is pending are
    /// skipped without calling the geocoder. The query text is never cleared.
    pub async fn search(&self) -> SearchOutcome {
        let Some((in_flight, query)) = self.begin_search() else {
            return SearchOutcome::Skipped;
        };

        let span = info_span!("location_search.search", search_id = %Uuid::new_v4());
        let result = self.geocoder.search(&query).instrument(span.clone()).await;
        drop(in_flight);

        span.in_scope(|| match result {
            Ok(found) => {
                info!(
                    latitude = found.latitude,
                    longitude = found.longitude,
                    display_name = %found.display_name,
                    "search result found"
                );
                self.map.center_on(&found);
                SearchOutcome::Found(found)
            }
            Err(GeocodingError::NoResults) => {
                debug!("geocoder returned no candidates");
                self.notifier.notify_error(NO_RESULTS_MESSAGE);
                SearchOutcome::NoResults
            }
            Err(error) => {
                warn!(%error, "location search failed");
                self.notifier.notify_error(SEARCH_FAILED_MESSAGE);
                SearchOutcome::Failed(error)
            }
        })
    }

    fn begin_search(&self) -> Option<(InFlight<'_>, String)> {
        let mut state = lock(&self.state);
        if state.query.trim().is_empty() {
            debug!("blank search query; skipping geocoder call");
            return None;
        }
        if state.is_submitting {
            debug!("search already in flight; ignoring search");
            return None;
        }
        state.is_submitting = true;
        let query = state.query.clone();
        drop(state);
        Some((InFlight { state: &self.state }, query))
    }
}

/// Clears the in-flight flag on every exit path.
struct InFlight<'a> {
    state: &'a Mutex<SearchState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).is_submitting = false;
    }
}

fn lock(state: &Mutex<SearchState>) -> MutexGuard<'_, SearchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
