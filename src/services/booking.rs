use serde::{Deserialize, Serialize};

use crate::errors::{AppError, ValidationError};
use crate::models::CreateAppointmentPayload;
use crate::services::api::AppointmentsApi;

pub const REASON_MAX_CHARS: usize = 200;

/// Guest booking form as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub reason: String,
}

impl BookingForm {
    /// Trims every field and builds the create payload, or reports the first
    /// failed check.
    pub fn validate(&self, start_time: &str) -> Result<CreateAppointmentPayload, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        let reason = self.reason.trim();

        if name.is_empty() || email.is_empty() {
            return Err(ValidationError::MissingContact);
        }
        if reason.chars().count() > REASON_MAX_CHARS {
            return Err(ValidationError::ReasonTooLong);
        }

        Ok(CreateAppointmentPayload {
            start_time: start_time.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: non_empty(phone),
            reason: non_empty(reason),
        })
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub async fn submit_booking(
    api: &dyn AppointmentsApi,
    start_time: &str,
    form: &BookingForm,
) -> Result<(), AppError> {
    let payload = form.validate(start_time)?;
    api.create_appointment(&payload).await?;
    tracing::info!(start_time = %payload.start_time, "appointment booked");
    Ok(())
}
