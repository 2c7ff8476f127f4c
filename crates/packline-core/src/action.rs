//! Audit record for transfer operations

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Move,
    Scrap,
    Reassign,
}

/// Immutable audit record of one transfer operation. Once recorded in the
/// action log an entry is never mutated; the log, not current container
/// state, is the source of truth for "what happened".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferAction {
    pub unit_id: String,
    pub from_container_id: String,
    /// `None` means the unit went to scrap.
    pub to_container_id: Option<String>,
    pub action: ActionKind,
    pub reason: Option<String>,
    pub performed_by: String,
    #[serde(with = "time::serde::timestamp")]
    pub performed_at: OffsetDateTime,
}

impl TransferAction {
    pub fn new(
        action: ActionKind,
        unit_id: impl Into<String>,
        from_container_id: impl Into<String>,
        to_container_id: Option<String>,
        performed_by: impl Into<String>,
    ) -> Self {
        Self {
            unit_id: unit_id.into(),
            from_container_id: from_container_id.into(),
            to_container_id,
            action,
            reason: None,
            performed_by: performed_by.into(),
            performed_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}
