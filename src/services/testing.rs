//! In-memory backend used by the unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use tokio::sync::Notify;

use crate::models::{
    Appointment, AppointmentsResponse, AvailableSlotsResponse, CreateAppointmentPayload,
    UpdateAppointmentPayload,
};
use crate::services::api::{ApiError, AppointmentsApi};

pub fn appointment(id: i64, start_time: &str, name: &str) -> Appointment {
    Appointment {
        id,
        start_time: start_time.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        reason: None,
        created_at: "2025-06-10T12:00:00Z".to_string(),
    }
}

#[derive(Clone)]
pub struct Gate {
    started: Arc<Notify>,
    released: Arc<Notify>,
}

impl Gate {
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[derive(Default)]
struct MockState {
    slots: HashMap<i64, Vec<String>>,
    appointments: BTreeMap<i64, Vec<Appointment>>,
    last_page: Option<i64>,
    force_has_previous: Option<bool>,
    fail_next: Option<String>,
    held_slots: HashMap<i64, Gate>,
    slot_requests: Vec<i64>,
    appointment_requests: Vec<i64>,
    created: Vec<CreateAppointmentPayload>,
    updated: Vec<(i64, UpdateAppointmentPayload)>,
    cancelled: Vec<i64>,
}

#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_slots(&self, page: i64, slots: Vec<&str>) {
        self.state
            .lock()
            .unwrap()
            .slots
            .insert(page, slots.into_iter().map(String::from).collect());
    }

    pub fn add_appointment(&self, page: i64, appointment: Appointment) {
        self.state
            .lock()
            .unwrap()
            .appointments
            .entry(page)
            .or_default()
            .push(appointment);
    }

    pub fn set_last_page(&self, page: i64) {
        self.state.lock().unwrap().last_page = Some(page);
    }

    pub fn force_has_previous(&self, value: bool) {
        self.state.lock().unwrap().force_has_previous = Some(value);
    }

    pub fn fail_next(&self, message: &str) {
        self.state.lock().unwrap().fail_next = Some(message.to_string());
    }

    /// Makes the next availability request for `page` wait until the
    /// returned gate is released.
    pub fn hold_slots_page(&self, page: i64) -> Gate {
        let gate = Gate {
            started: Arc::new(Notify::new()),
            released: Arc::new(Notify::new()),
        };
        self.state
            .lock()
            .unwrap()
            .held_slots
            .insert(page, gate.clone());
        gate
    }

    pub fn slot_requests(&self) -> Vec<i64> {
        self.state.lock().unwrap().slot_requests.clone()
    }

    pub fn appointment_requests(&self) -> Vec<i64> {
        self.state.lock().unwrap().appointment_requests.clone()
    }

    pub fn created(&self) -> Vec<CreateAppointmentPayload> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn updated(&self) -> Vec<(i64, UpdateAppointmentPayload)> {
        self.state.lock().unwrap().updated.clone()
    }

    pub fn cancelled(&self) -> Vec<i64> {
        self.state.lock().unwrap().cancelled.clone()
    }

    fn take_failure(state: &mut MockState) -> Result<(), ApiError> {
        match state.fail_next.take() {
            Some(message) => Err(ApiError::Status {
                status: 400,
                message,
            }),
            None => Ok(()),
        }
    }

    fn week_bounds(page: i64) -> (String, String) {
        let base = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap() + Duration::days(7 * page);
        (
            base.format("%Y-%m-%d").to_string(),
            (base + Duration::days(6)).format("%Y-%m-%d").to_string(),
        )
    }

    fn paging(state: &MockState, page: i64) -> (bool, Option<i64>, Option<i64>) {
        let has_previous = state.force_has_previous.unwrap_or(page > 0);
        let previous_page = (page > 0).then(|| page - 1);
        let next_page = match state.last_page {
            Some(last) if page >= last => None,
            _ => Some(page + 1),
        };
        (has_previous, previous_page, next_page)
    }
}

#[async_trait]
impl AppointmentsApi for MockApi {
    async fn available_slots(&self, page: i64) -> Result<AvailableSlotsResponse, ApiError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.slot_requests.push(page);
            state.held_slots.remove(&page)
        };
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.released.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        let slots = state.slots.get(&page).cloned().unwrap_or_default();
        let (week_start, week_end) = Self::week_bounds(page);
        let (has_previous, previous_page, next_page) = Self::paging(&state, page);
        Ok(AvailableSlotsResponse {
            page,
            week_start,
            week_end,
            count: slots.len() as i64,
            available_slots: slots,
            has_previous,
            previous_page,
            next_page,
        })
    }

    async fn appointments(&self, page: i64) -> Result<AppointmentsResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.appointment_requests.push(page);
        Self::take_failure(&mut state)?;
        let appointments = state.appointments.get(&page).cloned().unwrap_or_default();
        let (week_start, week_end) = Self::week_bounds(page);
        let (has_previous, previous_page, next_page) = Self::paging(&state, page);
        Ok(AppointmentsResponse {
            page,
            week_start,
            week_end,
            count: appointments.len() as i64,
            appointments,
            has_previous,
            previous_page,
            next_page,
        })
    }

    async fn create_appointment(&self, payload: &CreateAppointmentPayload) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        state.created.push(payload.clone());
        for slots in state.slots.values_mut() {
            slots.retain(|s| *s != payload.start_time);
        }
        Ok(())
    }

    async fn update_appointment(
        &self,
        id: i64,
        payload: &UpdateAppointmentPayload,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        state.updated.push((id, payload.clone()));
        for appointment in state.appointments.values_mut().flatten() {
            if appointment.id == id {
                appointment.start_time = payload.start_time.clone();
                if payload.reason.is_some() {
                    appointment.reason = payload.reason.clone();
                }
            }
        }
        Ok(())
    }

    async fn cancel_appointment(&self, id: i64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        let before: usize = state.appointments.values().map(Vec::len).sum();
        for list in state.appointments.values_mut() {
            list.retain(|a| a.id != id);
        }
        let after: usize = state.appointments.values().map(Vec::len).sum();
        if before == after {
            return Err(ApiError::Status {
                status: 404,
                message: "Appointment not found".to_string(),
            });
        }
        state.cancelled.push(id);
        Ok(())
    }
}
