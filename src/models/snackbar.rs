use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_MS: u64 = 3500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnackbarVariant {
    Success,
    Error,
    #[default]
    Info,
}

impl SnackbarVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnackbarVariant::Success => "success",
            SnackbarVariant::Error => "error",
            SnackbarVariant::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snackbar {
    pub message: String,
    pub variant: SnackbarVariant,
    pub duration_ms: u64,
}
