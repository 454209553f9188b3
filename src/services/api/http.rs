use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{ApiError, AppointmentsApi};
use crate::models::{
    AppointmentsResponse, AvailableSlotsResponse, CreateAppointmentPayload,
    UpdateAppointmentPayload,
};

pub struct HttpAppointmentsApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAppointmentsApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn build_url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.build_url(endpoint);
        tracing::debug!(%method, %url, "backend request");
        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            tracing::warn!(status = status.as_u16(), message = %message, "backend returned error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, endpoint)).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::Decode(format!("empty body from {endpoint}")));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Joins base URL and endpoint with exactly one slash between them.
pub fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = endpoint.strip_prefix('/').unwrap_or(endpoint);
    format!("{base}/{path}")
}

async fn error_message(response: Response) -> String {
    let payload = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<serde_json::Value>(&bytes).ok(),
        Err(_) => None,
    };

    match payload {
        Some(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Request failed".to_string()),
        None => "Unexpected error response".to_string(),
    }
}

#[async_trait]
impl AppointmentsApi for HttpAppointmentsApi {
    async fn available_slots(&self, page: i64) -> Result<AvailableSlotsResponse, ApiError> {
        self.get_json(&format!("/api/appointments/available?page={page}"))
            .await
    }

    async fn appointments(&self, page: i64) -> Result<AppointmentsResponse, ApiError> {
        self.get_json(&format!("/api/appointments?page={page}")).await
    }

    async fn create_appointment(&self, payload: &CreateAppointmentPayload) -> Result<(), ApiError> {
        let request = self.request(Method::POST, "/api/appointments").json(payload);
        self.execute(request).await?;
        Ok(())
    }

    async fn update_appointment(
        &self,
        id: i64,
        payload: &UpdateAppointmentPayload,
    ) -> Result<(), ApiError> {
        let request = self
            .request(Method::PATCH, &format!("/api/appointments/{id}"))
            .json(payload);
        self.execute(request).await?;
        Ok(())
    }

    async fn cancel_appointment(&self, id: i64) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &format!("/api/appointments/{id}"));
        self.execute(request).await?;
        Ok(())
    }
}
