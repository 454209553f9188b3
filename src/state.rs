use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::admin::AdminPanel;
use crate::services::api::http::HttpAppointmentsApi;
use crate::services::api::AppointmentsApi;
use crate::services::clock::{Clock, SystemClock};
use crate::services::guest::GuestPage;
use crate::services::root_store::RootStore;
use crate::services::snackbar::SnackbarQueue;

pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<dyn AppointmentsApi>,
    pub store: RootStore,
    pub guest: GuestPage,
    pub admin: AdminPanel,
    pub snackbar: SnackbarQueue,
    pub clock: Box<dyn Clock>,
}

impl AppState {
    pub fn new(config: AppConfig, api: Arc<dyn AppointmentsApi>, clock: Box<dyn Clock>) -> Self {
        Self {
            store: RootStore::new(api.clone()),
            guest: GuestPage::new(),
            admin: AdminPanel::new(),
            snackbar: SnackbarQueue::new(config.snackbar_duration_ms),
            config,
            api,
            clock,
        }
    }

    /// State wired to the real backend over HTTP.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let api = HttpAppointmentsApi::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
        .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::new(config, Arc::new(api), Box::new(SystemClock)))
    }
}
