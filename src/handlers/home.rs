use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;
use crate::views;

// GET /
// Leaving the guest flow drops its calendar and selection, so the next
// visit starts from the initial week again.
pub async fn home_page(State(state): State<Arc<AppState>>) -> Html<String> {
    state.store.availability.reset();
    state.guest.reset();
    Html(views::home::render())
}
