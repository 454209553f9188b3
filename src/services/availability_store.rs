use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::models::availability::group_slots_by_day;
use crate::models::{DayAvailability, RequestStatus};
use crate::services::api::AppointmentsApi;

const FETCH_FALLBACK: &str = "Unexpected error while fetching slots.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityState {
    pub days: Vec<DayAvailability>,
    pub page: i64,
    pub week_start: Option<String>,
    pub week_end: Option<String>,
    pub has_previous: bool,
    pub has_next: bool,
    pub status: RequestStatus,
    pub error: Option<String>,
}

impl AvailabilityState {
    pub fn has_data(&self) -> bool {
        !self.days.is_empty()
    }

    pub fn can_go_previous(&self) -> bool {
        self.has_previous && !self.status.is_loading()
    }

    pub fn can_go_next(&self) -> bool {
        self.has_next && !self.status.is_loading()
    }
}

#[derive(Default)]
struct Inner {
    state: AvailabilityState,
    generation: u64,
}

/// Weekly availability calendar shown to guests.
pub struct AvailabilityStore {
    api: Arc<dyn AppointmentsApi>,
    inner: Mutex<Inner>,
}

impl AvailabilityStore {
    pub fn new(api: Arc<dyn AppointmentsApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> AvailabilityState {
        self.lock().state.clone()
    }

    pub fn status(&self) -> RequestStatus {
        self.lock().state.status
    }

    pub fn page(&self) -> i64 {
        self.lock().state.page
    }

    pub fn has_data(&self) -> bool {
        self.lock().state.has_data()
    }

    /// Loads the given week offset and regroups its slots by day. Failures
    /// leave the previously loaded days in place.
    pub async fn fetch_available_slots(&self, page: i64) {
        let ticket = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state.status = RequestStatus::Loading;
            inner.state.error = None;
            inner.generation
        };

        let result = self.api.available_slots(page).await;

        let mut inner = self.lock();
        if inner.generation != ticket {
            tracing::debug!(page, "discarding stale availability response");
            return;
        }
        let state = &mut inner.state;

        match result {
            Ok(response) => {
                state.days = group_slots_by_day(&response.available_slots);
                state.page = response.page;
                state.week_start = Some(response.week_start);
                state.week_end = Some(response.week_end);
                state.has_previous = page > 0 && response.has_previous;
                state.has_next = response.next_page.is_some();
                state.status = RequestStatus::Ready;
                tracing::info!(
                    page = state.page,
                    days = state.days.len(),
                    slots = response.available_slots.len(),
                    "availability loaded"
                );
            }
            Err(e) => {
                tracing::error!(page, status = ?e.status(), error = %e, "failed to fetch available slots");
                state.status = RequestStatus::Error;
                state.error = Some(e.user_message(FETCH_FALLBACK));
            }
        }
    }

    /// Back to the initial state. A fetch still in flight is ignored when
    /// it lands.
    pub fn reset(&self) {
        self.hydrate(AvailabilityState::default());
    }

    pub fn hydrate(&self, snapshot: AvailabilityState) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = snapshot;
    }
}
