//! Latest-request-wins bookkeeping for dashboard refreshes.
//!
//! Every refresh takes a ticket. A result is applied only if its ticket is
//! still the newest one, so a slow response for an old selection can never
//! overwrite the view for a newer one.

use super::service::{DashboardService, Geolocator};
use crate::Result;
use crate::models::WeatherView;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Handle for one in-flight refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: u64,
    selection: Option<String>,
}

impl Ticket {
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }
}

/// What the dashboard currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub view: Option<WeatherView>,
    /// False once the latest build failed; `view` is then stale
    pub is_live: bool,
    pub loading: bool,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ViewTracker {
    latest: AtomicU64,
    state: Mutex<DashboardState>,
}

impl ViewTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh, superseding any refresh still in flight
    pub fn begin(&self, selection: Option<&str>) -> Ticket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.with_state(|state| state.loading = true);
        Ticket {
            id,
            selection: selection.map(str::to_string),
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.id
    }

    /// Apply a finished build. Returns false if the ticket was superseded.
    pub fn complete(&self, ticket: &Ticket, result: Result<WeatherView>) -> bool {
        if !self.is_current(ticket) {
            debug!("Discarding superseded result for {:?}", ticket.selection);
            return false;
        }

        self.with_state(|state| {
            state.loading = false;
            match result {
                Ok(view) => {
                    state.view = Some(view);
                    state.is_live = true;
                    state.last_error = None;
                }
                Err(e) => {
                    state.is_live = false;
                    state.last_error = Some(e.user_message());
                }
            }
        });
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Build a view for `selection` and apply it unless superseded meanwhile
    pub async fn refresh(
        &self,
        service: &DashboardService,
        selection: Option<&str>,
        geolocator: &dyn Geolocator,
    ) -> bool {
        let ticket = self.begin(selection);
        let result = service.build_view(ticket.selection(), geolocator).await;
        self.complete(&ticket, result)
    }

    fn with_state<F: FnOnce(&mut DashboardState)>(&self, f: F) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }
}
