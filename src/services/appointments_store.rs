use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::models::{Appointment, RequestStatus};
use crate::services::api::{ApiError, AppointmentsApi};

const FETCH_FALLBACK: &str = "Unable to load appointments.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentsState {
    pub items: Vec<Appointment>,
    pub status: RequestStatus,
    pub error: Option<String>,
    pub page: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub week_start: Option<String>,
    pub week_end: Option<String>,
}

impl AppointmentsState {
    pub fn find(&self, id: i64) -> Option<&Appointment> {
        self.items.iter().find(|a| a.id == id)
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
    state: AppointmentsState,
    generation: u64,
}

/// Admin view of the booked appointments, one week per page.
pub struct AppointmentsStore {
    api: Arc<dyn AppointmentsApi>,
    inner: Mutex<Inner>,
}

impl AppointmentsStore {
    pub fn new(api: Arc<dyn AppointmentsApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> AppointmentsState {
        self.lock().state.clone()
    }

    pub fn status(&self) -> RequestStatus {
        self.lock().state.status
    }

    pub fn page(&self) -> i64 {
        self.lock().state.page
    }

    pub fn find(&self, id: i64) -> Option<Appointment> {
        self.lock().state.find(id).cloned()
    }

    pub async fn fetch_appointments(&self, page: i64) {
        let ticket = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state.status = RequestStatus::Loading;
            inner.state.error = None;
            inner.generation
        };

        let result = self.api.appointments(page).await;

        let mut inner = self.lock();
        if inner.generation != ticket {
            tracing::debug!(page, "discarding stale appointments response");
            return;
        }
        let state = &mut inner.state;

        match result {
            Ok(response) => {
                state.items = response.appointments;
                state.page = response.page;
                state.has_previous = response.has_previous;
                state.has_next = response.next_page.is_some();
                state.week_start = Some(response.week_start);
                state.week_end = Some(response.week_end);
                state.status = RequestStatus::Ready;
                tracing::info!(page = state.page, count = state.items.len(), "appointments loaded");
            }
            Err(e) => {
                tracing::error!(page, status = ?e.status(), error = %e, "failed to fetch appointments");
                state.status = RequestStatus::Error;
                state.error = Some(e.user_message(FETCH_FALLBACK));
            }
        }
    }

    /// Cancels an appointment, then reloads the page currently shown. A
    /// failed cancel is returned untouched and the list is not reloaded.
    pub async fn cancel_and_refresh(&self, id: i64) -> Result<(), ApiError> {
        self.api.cancel_appointment(id).await?;
        tracing::info!(id, "appointment cancelled");
        let page = self.page();
        self.fetch_appointments(page).await;
        Ok(())
    }

    pub fn reset(&self) {
        self.hydrate(AppointmentsState::default());
    }

    pub fn hydrate(&self, snapshot: AppointmentsState) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = snapshot;
    }
}
