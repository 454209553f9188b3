use std::sync::Mutex;

use crate::models::{Snackbar, SnackbarVariant};

/// Holds at most one pending message; a newer one replaces it. The next
/// page render takes it.
pub struct SnackbarQueue {
    duration_ms: u64,
    current: Mutex<Option<Snackbar>>,
}

impl SnackbarQueue {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            current: Mutex::new(None),
        }
    }

    pub fn show(&self, message: impl Into<String>, variant: SnackbarVariant) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        let snackbar = Snackbar {
            message,
            variant,
            duration_ms: self.duration_ms,
        };
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(snackbar);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, SnackbarVariant::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, SnackbarVariant::Error);
    }

    pub fn take(&self) -> Option<Snackbar> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn peek(&self) -> Option<Snackbar> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
