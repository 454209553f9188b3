use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::services::root_store::RootStoreSnapshot;
use crate::state::AppState;

// GET /api/state
pub async fn store_snapshot(State(state): State<Arc<AppState>>) -> Json<RootStoreSnapshot> {
    Json(state.store.snapshot())
}
