use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, ValidationError};
use crate::models::availability::group_slots_by_day;
use crate::models::{
    Appointment, AvailableSlotsResponse, DayAvailability, RequestStatus, UpdateAppointmentPayload,
};
use crate::services::api::AppointmentsApi;
use crate::services::appointments_store::AppointmentsStore;
use crate::services::booking::{non_empty, REASON_MAX_CHARS};
use crate::services::snackbar::SnackbarQueue;
use crate::services::week::week_offset_from_today;

const CANCEL_FALLBACK: &str = "Failed to cancel the appointment.";
const EDIT_LOAD_FALLBACK: &str = "Unable to load available slots for editing.";
const EDIT_SUBMIT_FALLBACK: &str = "Failed to reschedule the appointment.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelDialog {
    pub appointment: Appointment,
    pub status: RequestStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditSession {
    pub appointment: Appointment,
    pub status: RequestStatus,
    pub error: Option<String>,
    pub week_page: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub days: Vec<DayAvailability>,
    pub selected_day: usize,
    pub selected_slot: Option<String>,
    pub reason: String,
}

impl EditSession {
    fn new(appointment: Appointment) -> Self {
        let reason = appointment.reason.clone().unwrap_or_default();
        Self {
            appointment,
            status: RequestStatus::Idle,
            error: None,
            week_page: 0,
            has_previous: false,
            has_next: false,
            days: Vec::new(),
            selected_day: 0,
            selected_slot: None,
            reason,
        }
    }

    pub fn selected_day(&self) -> Option<&DayAvailability> {
        self.days.get(self.selected_day)
    }

    pub fn contains_slot(&self, iso: &str) -> bool {
        self.days
            .iter()
            .any(|day| day.slots.iter().any(|s| s.iso == iso))
    }

    pub fn can_go_previous(&self) -> bool {
        self.has_previous && !self.status.is_loading()
    }

    pub fn can_go_next(&self) -> bool {
        self.has_next && !self.status.is_loading()
    }

    /// Applies a week of availability. The appointment's own slot is kept
    /// selectable even when the backend no longer lists it as free.
    fn apply(&mut self, response: AvailableSlotsResponse, current_slot: Option<&str>) {
        let mut slots = response.available_slots;
        if let Some(current) = current_slot {
            if !slots.iter().any(|s| s == current) {
                slots.push(current.to_string());
            }
        }
        slots.sort();
        let days = group_slots_by_day(&slots);

        let selected_day = current_slot
            .and_then(|current| current.get(0..10))
            .and_then(|date| days.iter().position(|day| day.iso_date == date))
            .unwrap_or(0);
        let selected_slot = current_slot
            .map(str::to_string)
            .or_else(|| {
                days.get(selected_day)
                    .and_then(|day| day.first_slot())
                    .map(|s| s.iso.clone())
            })
            .or_else(|| {
                days.first()
                    .and_then(|day| day.first_slot())
                    .map(|s| s.iso.clone())
            });

        self.days = days;
        self.week_page = response.page;
        self.has_previous = response.has_previous;
        self.has_next = response.next_page.is_some();
        self.selected_day = selected_day;
        self.selected_slot = selected_slot;
        self.status = RequestStatus::Ready;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDirection {
    Previous,
    Next,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdminDialogs {
    pub cancel: Option<CancelDialog>,
    pub edit: Option<EditSession>,
}

#[derive(Default)]
struct Inner {
    dialogs: AdminDialogs,
    edit_generation: u64,
}

/// Cancel confirmation and reschedule dialogs of the admin page. At most
/// one of them is open at a time.
#[derive(Default)]
pub struct AdminPanel {
    inner: Mutex<Inner>,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> AdminDialogs {
        self.lock().dialogs.clone()
    }

    /// Closes whichever dialog is open unless it is waiting on the backend.
    pub fn close(&self) {
        let mut inner = self.lock();
        let busy = inner
            .dialogs
            .cancel
            .as_ref()
            .is_some_and(|c| c.status.is_loading())
            || inner
                .dialogs
                .edit
                .as_ref()
                .is_some_and(|e| e.status.is_loading());
        if busy {
            tracing::debug!("dialog busy, not closing");
            return;
        }
        inner.edit_generation += 1;
        inner.dialogs = AdminDialogs::default();
    }

    pub fn open_cancel(&self, store: &AppointmentsStore, id: i64) -> Result<(), AppError> {
        let appointment = store
            .find(id)
            .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))?;
        let mut inner = self.lock();
        inner.edit_generation += 1;
        inner.dialogs = AdminDialogs {
            cancel: Some(CancelDialog {
                appointment,
                status: RequestStatus::Idle,
                error: None,
            }),
            edit: None,
        };
        Ok(())
    }

    pub async fn confirm_cancel(
        &self,
        store: &AppointmentsStore,
        snackbar: &SnackbarQueue,
        id: i64,
    ) -> Result<(), AppError> {
        {
            let mut inner = self.lock();
            match inner.dialogs.cancel.as_mut() {
                Some(dialog) if dialog.appointment.id == id => {
                    dialog.status = RequestStatus::Loading;
                    dialog.error = None;
                }
                _ => return Err(AppError::NotFound(format!("cancel dialog for {id}"))),
            }
        }

        match store.cancel_and_refresh(id).await {
            Ok(()) => {
                self.lock().dialogs.cancel = None;
                snackbar.success("Appointment cancelled successfully.");
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(CANCEL_FALLBACK);
                if let Some(dialog) = self.lock().dialogs.cancel.as_mut() {
                    dialog.status = RequestStatus::Error;
                    dialog.error = Some(message.clone());
                }
                snackbar.error(message);
                Err(e.into())
            }
        }
    }

    /// Opens the reschedule dialog on the week the appointment falls in.
    pub async fn open_edit(
        &self,
        api: &dyn AppointmentsApi,
        store: &AppointmentsStore,
        id: i64,
        today: NaiveDate,
    ) -> Result<(), AppError> {
        let appointment = store
            .find(id)
            .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))?;
        let week = appointment
            .start_date()
            .map(|date| week_offset_from_today(date, today))
            .unwrap_or(0);
        let current_slot = appointment.start_time.clone();

        {
            let mut inner = self.lock();
            inner.dialogs = AdminDialogs {
                cancel: None,
                edit: Some(EditSession::new(appointment)),
            };
        }

        self.load_edit_week(api, week, Some(current_slot.as_str())).await;
        Ok(())
    }

    /// Moves the edit dialog one week. `reason` is the text typed so far;
    /// it survives the reload.
    pub async fn edit_week(
        &self,
        api: &dyn AppointmentsApi,
        direction: WeekDirection,
        reason: Option<String>,
    ) {
        let target = {
            let mut inner = self.lock();
            let Some(session) = inner.dialogs.edit.as_mut() else {
                return;
            };
            if let Some(reason) = reason {
                session.reason = reason;
            }
            match direction {
                WeekDirection::Previous if session.can_go_previous() => {
                    (session.week_page - 1).max(0)
                }
                WeekDirection::Next if session.can_go_next() => session.week_page + 1,
                _ => return,
            }
        };
        self.load_edit_week(api, target, None).await;
    }

    async fn load_edit_week(&self, api: &dyn AppointmentsApi, page: i64, current_slot: Option<&str>) {
        let ticket = {
            let mut inner = self.lock();
            inner.edit_generation += 1;
            let ticket = inner.edit_generation;
            match inner.dialogs.edit.as_mut() {
                Some(session) => {
                    session.status = RequestStatus::Loading;
                    session.error = None;
                }
                None => return,
            }
            ticket
        };

        let result = api.available_slots(page).await;

        let mut inner = self.lock();
        if inner.edit_generation != ticket {
            tracing::debug!(page, "discarding stale edit availability response");
            return;
        }
        let Some(session) = inner.dialogs.edit.as_mut() else {
            return;
        };
        match result {
            Ok(response) => {
                session.apply(response, current_slot);
                tracing::info!(
                    id = session.appointment.id,
                    page = session.week_page,
                    "edit availability loaded"
                );
            }
            Err(e) => {
                tracing::error!(page, status = ?e.status(), error = %e, "failed to load edit availability");
                session.status = RequestStatus::Error;
                session.error = Some(e.user_message(EDIT_LOAD_FALLBACK));
            }
        }
    }

    /// Selects a day of the edit dialog together with its first slot,
    /// keeping the reason typed so far.
    pub fn edit_select_day(&self, index: usize, reason: Option<String>) {
        let mut inner = self.lock();
        let Some(session) = inner.dialogs.edit.as_mut() else {
            return;
        };
        if let Some(reason) = reason {
            session.reason = reason;
        }
        let Some(day) = session.days.get(index) else {
            tracing::warn!(index, "ignoring selection of unknown day");
            return;
        };
        session.selected_slot = day.first_slot().map(|s| s.iso.clone());
        session.selected_day = index;
    }

    /// Saves the new start time. `slot` and `reason` come from the dialog's
    /// form; a slot that is not on the loaded week counts as no selection.
    pub async fn submit_edit(
        &self,
        api: &dyn AppointmentsApi,
        store: &AppointmentsStore,
        snackbar: &SnackbarQueue,
        slot: Option<String>,
        reason: String,
    ) -> Result<(), AppError> {
        let (id, payload) = {
            let mut inner = self.lock();
            let Some(session) = inner.dialogs.edit.as_mut() else {
                return Err(AppError::NotFound("edit dialog".to_string()));
            };
            if let Some(slot) = slot.filter(|s| !s.is_empty()) {
                session.selected_slot = session.contains_slot(&slot).then_some(slot);
            }
            session.reason = reason;
            session.error = None;

            let check = match session.selected_slot.clone() {
                None => Err(ValidationError::MissingSlot),
                Some(_) if session.reason.chars().count() > REASON_MAX_CHARS => {
                    Err(ValidationError::ReasonTooLong)
                }
                Some(start_time) => Ok(start_time),
            };
            let start_time = match check {
                Ok(start_time) => start_time,
                Err(e) => {
                    session.error = Some(e.to_string());
                    return Err(e.into());
                }
            };

            session.status = RequestStatus::Loading;
            let payload = UpdateAppointmentPayload {
                start_time,
                reason: non_empty(session.reason.trim()),
            };
            (session.appointment.id, payload)
        };

        match api.update_appointment(id, &payload).await {
            Ok(()) => {
                {
                    let mut inner = self.lock();
                    inner.edit_generation += 1;
                    inner.dialogs.edit = None;
                }
                tracing::info!(id, start_time = %payload.start_time, "appointment rescheduled");
                snackbar.success("Appointment rescheduled successfully.");
                store.fetch_appointments(store.page()).await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(id, status = ?e.status(), error = %e, "failed to reschedule appointment");
                let message = e.user_message(EDIT_SUBMIT_FALLBACK);
                if let Some(session) = self.lock().dialogs.edit.as_mut() {
                    session.status = RequestStatus::Error;
                    session.error = Some(message.clone());
                }
                snackbar.error(message);
                Err(e.into())
            }
        }
    }
}
