pub mod admin;
pub mod api;
pub mod guest;
pub mod health;
pub mod home;

use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health))
        .route("/api/state", get(api::store_snapshot))
        .route("/guest/schedule", get(guest::schedule_page))
        .route("/guest/schedule/previous", post(guest::previous_week))
        .route("/guest/schedule/next", post(guest::next_week))
        .route("/guest/schedule/day", post(guest::select_day))
        .route("/guest/schedule/slot", post(guest::select_slot))
        .route("/guest/schedule/close", post(guest::close_form))
        .route("/guest/schedule/book", post(guest::book))
        .route("/admin/appointments", get(admin::appointments_page))
        .route("/admin/appointments/previous", post(admin::previous_week))
        .route("/admin/appointments/next", post(admin::next_week))
        .route(
            "/admin/appointments/:id/cancel-request",
            post(admin::open_cancel),
        )
        .route("/admin/appointments/:id/cancel", post(admin::confirm_cancel))
        .route("/admin/appointments/:id/edit", post(admin::open_edit))
        .route("/admin/appointments/edit/week", post(admin::edit_week))
        .route("/admin/appointments/edit/day", post(admin::edit_select_day))
        .route("/admin/appointments/edit/submit", post(admin::submit_edit))
        .route("/admin/appointments/dialog/close", post(admin::close_dialog))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Form failures re-render the page under the error's status so the
/// message shows where the user was; anything else goes out as JSON.
pub(crate) fn rerender_on_error(err: AppError, page: impl FnOnce() -> Html<String>) -> Response {
    match err {
        AppError::Validation(_) | AppError::Api(_) => (err.status_code(), page()).into_response(),
        other => other.into_response(),
    }
}
