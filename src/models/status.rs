use serde::{Deserialize, Serialize};

/// Request lifecycle of a store, used only to decide what to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Ready => "ready",
            RequestStatus::Error => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }
}
