use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::{AppError, ValidationError};
use crate::models::RequestStatus;
use crate::services::api::AppointmentsApi;
use crate::services::availability_store::AvailabilityStore;
use crate::services::booking::{submit_booking, BookingForm};
use crate::services::snackbar::SnackbarQueue;
use crate::services::week::is_weekend;

const BOOKING_FALLBACK: &str = "Unable to create the appointment right now.";

/// First week to show. On weekends the current week is over, so the
/// calendar starts at least one week ahead.
pub fn initial_page(today: NaiveDate, current_page: i64) -> i64 {
    if is_weekend(today) {
        current_page.max(1)
    } else {
        0
    }
}

/// Week the previous button goes to, or `None` when it would not move.
pub fn previous_page_target(today: NaiveDate, page: i64) -> Option<i64> {
    let floor = if is_weekend(today) { 1 } else { 0 };
    let target = (page - 1).max(floor);
    (target != page).then_some(target)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GuestSelection {
    pub selected_day: usize,
    pub selected_slot: Option<String>,
    pub form_visible: bool,
    pub form: BookingForm,
    pub form_error: Option<String>,
}

impl GuestSelection {
    fn clear(&mut self) {
        *self = GuestSelection::default();
    }
}

/// Selection state of the guest calendar plus the booking form on top of it.
#[derive(Default)]
pub struct GuestPage {
    selection: Mutex<GuestSelection>,
}

impl GuestPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GuestSelection> {
        self.selection.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current selection, clamped to the days the store holds.
    pub fn snapshot(&self, days_len: usize) -> GuestSelection {
        let mut selection = self.lock();
        if days_len > 0 && selection.selected_day >= days_len {
            selection.clear();
        }
        selection.clone()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    pub async fn ensure_loaded(&self, store: &AvailabilityStore, today: NaiveDate) {
        if store.status() == RequestStatus::Idle {
            let page = initial_page(today, store.page());
            store.fetch_available_slots(page).await;
        }
    }

    pub async fn previous_week(&self, store: &AvailabilityStore, today: NaiveDate) {
        if !store.snapshot().can_go_previous() {
            tracing::debug!("previous week not available");
            return;
        }
        let Some(target) = previous_page_target(today, store.page()) else {
            return;
        };
        self.lock().clear();
        store.fetch_available_slots(target).await;
    }

    pub async fn next_week(&self, store: &AvailabilityStore) {
        let state = store.snapshot();
        if !state.can_go_next() {
            tracing::debug!("next week not available");
            return;
        }
        self.lock().clear();
        store.fetch_available_slots(state.page + 1).await;
    }

    pub fn select_day(&self, store: &AvailabilityStore, index: usize) {
        if index >= store.snapshot().days.len() {
            tracing::warn!(index, "ignoring selection of unknown day");
            return;
        }
        let mut selection = self.lock();
        selection.selected_day = index;
        selection.selected_slot = None;
        selection.form_visible = false;
        selection.form_error = None;
    }

    /// Picks a slot of the selected day and opens a fresh booking form for it.
    pub fn select_slot(&self, store: &AvailabilityStore, iso: &str) {
        let state = store.snapshot();
        let mut selection = self.lock();
        let exists = state
            .days
            .get(selection.selected_day)
            .is_some_and(|day| day.slots.iter().any(|s| s.iso == iso));
        if !exists {
            tracing::warn!(slot = %iso, "ignoring selection of unknown slot");
            return;
        }
        selection.selected_slot = Some(iso.to_string());
        selection.form_visible = true;
        selection.form = BookingForm::default();
        selection.form_error = None;
    }

    pub fn close_form(&self) {
        let mut selection = self.lock();
        selection.form_visible = false;
        selection.form_error = None;
    }

    /// Books the selected slot. On success the form closes, the slot is
    /// released and the week reloads; on failure the entered values stay
    /// and the message is shown in the form.
    pub async fn book(
        &self,
        api: &dyn AppointmentsApi,
        store: &AvailabilityStore,
        snackbar: &SnackbarQueue,
        form: BookingForm,
    ) -> Result<(), AppError> {
        let start_time = {
            let mut selection = self.lock();
            selection.form = form.clone();
            selection.form_error = None;
            selection.selected_slot.clone()
        };

        let result = match start_time {
            Some(start_time) => submit_booking(api, &start_time, &form).await,
            None => Err(ValidationError::MissingSlot.into()),
        };

        match result {
            Ok(()) => {
                {
                    let mut selection = self.lock();
                    selection.form_visible = false;
                    selection.selected_slot = None;
                    selection.form = BookingForm::default();
                }
                snackbar.success("Appointment booked successfully.");
                store.fetch_available_slots(store.page()).await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(BOOKING_FALLBACK);
                tracing::warn!(error = %e, "booking rejected");
                let mut selection = self.lock();
                selection.form_visible = true;
                selection.form_error = Some(message);
                Err(e)
            }
        }
    }
}
