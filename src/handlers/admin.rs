use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::RequestStatus;
use crate::services::admin::WeekDirection;
use crate::state::AppState;
use crate::views;

use super::rerender_on_error;

const PAGE: &str = "/admin/appointments";

fn render(state: &AppState) -> Html<String> {
    let appointments = state.store.appointments.snapshot();
    let dialogs = state.admin.snapshot();
    let snackbar = state.snackbar.take();
    Html(views::admin::render(&appointments, &dialogs, snackbar.as_ref()))
}

// GET /admin/appointments
pub async fn appointments_page(State(state): State<Arc<AppState>>) -> Html<String> {
    if state.store.appointments.status() == RequestStatus::Idle {
        state.store.appointments.fetch_appointments(0).await;
    }
    render(&state)
}

// POST /admin/appointments/previous
pub async fn previous_week(State(state): State<Arc<AppState>>) -> Redirect {
    let current = state.store.appointments.snapshot();
    if current.can_go_previous() {
        state
            .store
            .appointments
            .fetch_appointments(current.page - 1)
            .await;
    }
    Redirect::to(PAGE)
}

// POST /admin/appointments/next
pub async fn next_week(State(state): State<Arc<AppState>>) -> Redirect {
    let current = state.store.appointments.snapshot();
    if current.can_go_next() {
        state
            .store
            .appointments
            .fetch_appointments(current.page + 1)
            .await;
    }
    Redirect::to(PAGE)
}

// POST /admin/appointments/:id/cancel-request
pub async fn open_cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.admin.open_cancel(&state.store.appointments, id)?;
    Ok(Redirect::to(PAGE))
}

// POST /admin/appointments/:id/cancel
pub async fn confirm_cancel(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    let result = state
        .admin
        .confirm_cancel(&state.store.appointments, &state.snackbar, id)
        .await;
    match result {
        Ok(()) => Redirect::to(PAGE).into_response(),
        Err(e) => rerender_on_error(e, || render(&state)),
    }
}

// POST /admin/appointments/:id/edit
pub async fn open_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state
        .admin
        .open_edit(
            state.api.as_ref(),
            &state.store.appointments,
            id,
            state.clock.today_utc(),
        )
        .await?;
    Ok(Redirect::to(PAGE))
}

#[derive(Deserialize)]
pub struct WeekForm {
    pub direction: WeekDirection,
    #[serde(default)]
    pub reason: Option<String>,
}

// POST /admin/appointments/edit/week
pub async fn edit_week(State(state): State<Arc<AppState>>, Form(form): Form<WeekForm>) -> Redirect {
    state
        .admin
        .edit_week(state.api.as_ref(), form.direction, form.reason)
        .await;
    Redirect::to(PAGE)
}

#[derive(Deserialize)]
pub struct DayForm {
    pub day: usize,
    #[serde(default)]
    pub reason: Option<String>,
}

// POST /admin/appointments/edit/day
pub async fn edit_select_day(
    State(state): State<Arc<AppState>>,
    Form(form): Form<DayForm>,
) -> Redirect {
    state.admin.edit_select_day(form.day, form.reason);
    Redirect::to(PAGE)
}

#[derive(Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub slot: Option<String>,
    #[serde(default)]
    pub reason: String,
}

// POST /admin/appointments/edit/submit
pub async fn submit_edit(State(state): State<Arc<AppState>>, Form(form): Form<EditForm>) -> Response {
    let result = state
        .admin
        .submit_edit(
            state.api.as_ref(),
            &state.store.appointments,
            &state.snackbar,
            form.slot,
            form.reason,
        )
        .await;
    match result {
        Ok(()) => Redirect::to(PAGE).into_response(),
        Err(e) => rerender_on_error(e, || render(&state)),
    }
}

// POST /admin/appointments/dialog/close
pub async fn close_dialog(State(state): State<Arc<AppState>>) -> Redirect {
    state.admin.close();
    Redirect::to(PAGE)
}
