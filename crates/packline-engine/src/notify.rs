//! Operation notifications for the presentation layer

use serde::{Deserialize, Serialize};

use packline_core::TraceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// Human-readable outcome of one operation, handed to whatever front end
/// sits on top of the engine (toast, status bar, CLI output).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// Every engine error maps to a user-visible rejection; none of them
    /// abort the session.
    pub fn from_error(err: &TraceError) -> Self {
        Self::error(err.to_string())
    }
}
