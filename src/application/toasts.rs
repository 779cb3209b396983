//! Transient, non-blocking notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::domain::ValidationErrors;

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);
/// Oldest toasts are dropped beyond this many.
pub const MAX_TOASTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

/// Queue of visible toasts, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?kind, message = %message, "toast");
        self.items.push_back(Toast {
            kind,
            message,
            shown_at: Instant::now(),
        });
        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    /// Drops toasts older than [`TOAST_LIFETIME`] at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < TOAST_LIFETIME);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, kind: ToastKind) -> usize {
        self.items.iter().filter(|toast| toast.kind == kind).count()
    }

    pub fn contains(&self, kind: ToastKind, message: &str) -> bool {
        self.items.iter().any(|toast| toast.kind == kind && toast.message == message)
    }
}

/// Shows every client-side validation failure as its own warning.
pub fn route_validation_errors(errors: &ValidationErrors, toasts: &mut Toasts) {
    for (field, message) in errors.iter() {
        tracing::debug!(field = field.name(), "validation failed");
        toasts.warn(message);
    }
}
