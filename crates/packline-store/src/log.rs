//! Append-only action history

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use packline_core::TransferAction;

/// Ordered record of every move/scrap/reassign, most recent first.
/// Entries are immutable once recorded; the log is the source of truth for
/// what happened, independent of current container state.
#[derive(Debug, Default, Serialize)]
pub struct ActionLog {
    entries: VecDeque<TransferAction>,
}

pub type SharedLog = Arc<Mutex<ActionLog>>;

pub fn lock_log(log: &SharedLog) -> MutexGuard<'_, ActionLog> {
    log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedLog {
        Arc::new(Mutex::new(self))
    }

    /// Prepend a new entry. No validation beyond structural completeness;
    /// the transfer engine has already vetted the operation.
    pub fn record(&mut self, action: TransferAction) {
        tracing::debug!(
            unit_id = %action.unit_id,
            kind = ?action.action,
            from = %action.from_container_id,
            to = action.to_container_id.as_deref().unwrap_or("scrap"),
            "action recorded"
        );
        self.entries.push_front(action);
    }

    /// Most-recent-first view of the history.
    pub fn entries(&self) -> impl Iterator<Item = &TransferAction> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&TransferAction> {
        self.entries.front()
    }

    /// Remove and return the most recent entry. Only the engine's undo
    /// path calls this, and it re-records the entry if the compensating
    /// mutation cannot be applied.
    pub fn pop_recent(&mut self) -> Option<TransferAction> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
