use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub snackbar_duration_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_url: env::var("API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            snackbar_duration_ms: env::var("SNACKBAR_DURATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(crate::models::snackbar::DEFAULT_DURATION_MS),
        }
    }
}
