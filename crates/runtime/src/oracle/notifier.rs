//! Notification sinks.
use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

use crate::api::Notifier;

/// Severity of a recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
    Permanent,
}

/// Routes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        info!(target: "runtime::notify", "{message}");
    }

    fn warn(&self, message: &str) {
        warn!(target: "runtime::notify", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "runtime::notify", "{message}");
    }

    fn error_permanent(&self, message: &str) {
        error!(target: "runtime::notify", permanent = true, "{message}");
    }
}

/// Keeps every notification for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, level: NoticeLevel) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    fn push(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.push(NoticeLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(NoticeLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(NoticeLevel::Error, message);
    }

    fn error_permanent(&self, message: &str) {
        self.push(NoticeLevel::Permanent, message);
    }
}
