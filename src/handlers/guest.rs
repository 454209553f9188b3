use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::services::booking::BookingForm;
use crate::state::AppState;
use crate::views;

use super::rerender_on_error;

const PAGE: &str = "/guest/schedule";

fn render(state: &AppState) -> Html<String> {
    let availability = state.store.availability.snapshot();
    let selection = state.guest.snapshot(availability.days.len());
    let snackbar = state.snackbar.take();
    Html(views::guest::render(&availability, &selection, snackbar.as_ref()))
}

// GET /guest/schedule
pub async fn schedule_page(State(state): State<Arc<AppState>>) -> Html<String> {
    state
        .guest
        .ensure_loaded(&state.store.availability, state.clock.today())
        .await;
    render(&state)
}

// POST /guest/schedule/previous
pub async fn previous_week(State(state): State<Arc<AppState>>) -> Redirect {
    state
        .guest
        .previous_week(&state.store.availability, state.clock.today())
        .await;
    Redirect::to(PAGE)
}

// POST /guest/schedule/next
pub async fn next_week(State(state): State<Arc<AppState>>) -> Redirect {
    state.guest.next_week(&state.store.availability).await;
    Redirect::to(PAGE)
}

#[derive(Deserialize)]
pub struct DayForm {
    pub day: usize,
}

// POST /guest/schedule/day
pub async fn select_day(State(state): State<Arc<AppState>>, Form(form): Form<DayForm>) -> Redirect {
    state.guest.select_day(&state.store.availability, form.day);
    Redirect::to(PAGE)
}

#[derive(Deserialize)]
pub struct SlotForm {
    pub slot: String,
}

// POST /guest/schedule/slot
pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SlotForm>,
) -> Redirect {
    state.guest.select_slot(&state.store.availability, &form.slot);
    Redirect::to(PAGE)
}

// POST /guest/schedule/close
pub async fn close_form(State(state): State<Arc<AppState>>) -> Redirect {
    state.guest.close_form();
    Redirect::to(PAGE)
}

// POST /guest/schedule/book
pub async fn book(State(state): State<Arc<AppState>>, Form(form): Form<BookingForm>) -> Response {
    let result = state
        .guest
        .book(
            state.api.as_ref(),
            &state.store.availability,
            &state.snackbar,
            form,
        )
        .await;
    match result {
        Ok(()) => Redirect::to(PAGE).into_response(),
        Err(e) => rerender_on_error(e, || render(&state)),
    }
}
