//! Transient user-facing notices ("toasts").

use std::sync::Mutex;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// Sink for notices. The front end decides how to show them.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Keeps every notice in memory, in order.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

/// Log a failed structural call and show its message once.
pub(crate) fn report(notifier: &dyn Notifier, action: &'static str, err: ApiError) -> ApiError {
    tracing::warn!(action, error = %err, "backend call failed");
    notifier.notify(Notice::error(err.user_message()));
    err
}
