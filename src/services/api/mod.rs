pub mod http;

use async_trait::async_trait;

use crate::models::{
    AppointmentsResponse, AvailableSlotsResponse, CreateAppointmentPayload,
    UpdateAppointmentPayload,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx answer from the backend; `message` is shown to the user as is.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text to put in front of the user. Decoding failures are not
    /// actionable, so they are logged and replaced by `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport(e) => e.to_string(),
            ApiError::Decode(detail) => {
                tracing::error!(detail = %detail, "backend response could not be decoded");
                fallback.to_string()
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The backend's appointment endpoints. `page` is always a week offset,
/// 0 being the current week.
#[async_trait]
pub trait AppointmentsApi: Send + Sync {
    async fn available_slots(&self, page: i64) -> Result<AvailableSlotsResponse, ApiError>;

    async fn appointments(&self, page: i64) -> Result<AppointmentsResponse, ApiError>;

    async fn create_appointment(&self, payload: &CreateAppointmentPayload) -> Result<(), ApiError>;

    async fn update_appointment(
        &self,
        id: i64,
        payload: &UpdateAppointmentPayload,
    ) -> Result<(), ApiError>;

    async fn cancel_appointment(&self, id: i64) -> Result<(), ApiError>;
}
