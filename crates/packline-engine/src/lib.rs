//! Transfer engine - the single authority for container membership
//!
//! Every change to which container a unit belongs to (or its removal into
//! scrap) goes through [`TransferEngine`]. Presentation code never touches
//! container children directly; the drag-and-drop adapter and the manual
//! transfer form both forward here.

pub mod drag;
pub mod notify;

pub use drag::DragController;
pub use notify::{Notification, NotificationKind};

use packline_core::{ActionKind, Result, TraceError, TransferAction};
use packline_store::{lock_log, lock_store, SharedLog, SharedStore, Store};

const DEFAULT_OPERATOR: &str = "operator";

/// Validates and applies unit transfers against the shared store, recording
/// every applied operation in the action log.
///
/// Each public operation takes the store lock once, performs all its checks
/// and mutations under that single lock, and records the audit entry before
/// releasing it. That is what makes a move atomic: no other caller can
/// observe a unit in zero or two containers.
#[derive(Clone)]
pub struct TransferEngine {
    store: SharedStore,
    log: SharedLog,
    operator: String,
}

impl TransferEngine {
    pub fn new(store: SharedStore, log: SharedLog) -> Self {
        Self {
            store,
            log,
            operator: DEFAULT_OPERATOR.to_string(),
        }
    }

    /// Name stamped into `performed_by` on audit entries.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn log(&self) -> &SharedLog {
        &self.log
    }

    /// Move a unit between containers, recording a `Move` action.
    pub fn move_unit(&self, unit_id: &str, from_id: &str, to_id: &str) -> Result<Notification> {
        self.transfer(unit_id, from_id, to_id, ActionKind::Move, None)
    }

    /// Manual transfer form: explicit reassignment to another container, or
    /// scrap when no destination is given. Field validation happens before
    /// any mutation attempt.
    pub fn manual_transfer(
        &self,
        unit_id: &str,
        from_id: &str,
        to_id: Option<&str>,
        reason: Option<String>,
    ) -> Result<Notification> {
        if unit_id.trim().is_empty() {
            return Err(TraceError::Validation("unit id is required".to_string()));
        }
        if from_id.trim().is_empty() {
            return Err(TraceError::Validation(
                "source container is required".to_string(),
            ));
        }
        match to_id {
            Some(to) => self.transfer(unit_id, from_id, to, ActionKind::Reassign, reason),
            None => self.scrap_unit(unit_id, from_id, reason),
        }
    }

    /// Remove a unit from circulation: mark it damaged, detach it, park it
    /// in the scrap collection, and record a `Scrap` action.
    pub fn scrap_unit(
        &self,
        unit_id: &str,
        from_id: &str,
        reason: Option<String>,
    ) -> Result<Notification> {
        let mut store = lock_store(&self.store);

        let mut unit = store.update_container(from_id, |c| c.remove_unit(unit_id))?;
        unit.mark_damaged();
        store.push_scrap(unit);

        let action = TransferAction::new(
            ActionKind::Scrap,
            unit_id,
            from_id,
            None,
            self.operator.as_str(),
        )
        .with_reason(reason.clone());
        lock_log(&self.log).record(action);

        tracing::info!(unit_id, from_id, ?reason, "unit scrapped");
        Ok(Notification::success(format!(
            "Scrapped {unit_id} from {from_id}"
        )))
    }

    /// Compensating undo: pop the most recent action and replay its inverse
    /// against the store. If the inverse cannot be applied (the original
    /// source vanished or filled up in the meantime) the entry goes back on
    /// the log head and the error surfaces, leaving everything unchanged.
    pub fn undo_last(&self) -> Result<Notification> {
        let mut store = lock_store(&self.store);
        let mut log = lock_log(&self.log);

        let action = log.pop_recent().ok_or(TraceError::NothingToUndo)?;
        let outcome = match action.action {
            ActionKind::Move | ActionKind::Reassign => self.undo_move(&mut store, &action),
            ActionKind::Scrap => self.undo_scrap(&mut store, &action),
        };

        match outcome {
            Ok(notification) => {
                tracing::info!(unit_id = %action.unit_id, kind = ?action.action, "undid last action");
                Ok(notification)
            }
            Err(err) => {
                // State untouched on failure; keep the history intact too.
                log.record(action);
                Err(err)
            }
        }
    }

    fn transfer(
        &self,
        unit_id: &str,
        from_id: &str,
        to_id: &str,
        kind: ActionKind,
        reason: Option<String>,
    ) -> Result<Notification> {
        if from_id == to_id {
            return Ok(Notification::info(format!(
                "{unit_id} is already in {to_id}"
            )));
        }

        let mut store = lock_store(&self.store);

        // All preconditions are checked before the first mutation, so a
        // rejection leaves both containers untouched.
        let source = store.find_container(from_id)?;
        if !source.contains_unit(unit_id) {
            return Err(TraceError::UnitNotFound {
                unit_id: unit_id.to_string(),
                container_id: from_id.to_string(),
            });
        }
        let destination = store.find_container(to_id)?;
        if destination.is_full() {
            return Err(TraceError::InvalidTarget(format!(
                "container {to_id} is full"
            )));
        }

        Self::apply_move(&mut store, unit_id, from_id, to_id)?;

        let action = TransferAction::new(
            kind,
            unit_id,
            from_id,
            Some(to_id.to_string()),
            self.operator.as_str(),
        )
        .with_reason(reason);
        lock_log(&self.log).record(action);

        tracing::info!(unit_id, from_id, to_id, ?kind, "unit transferred");
        Ok(Notification::success(format!(
            "Moved {unit_id} from {from_id} to {to_id}"
        )))
    }

    /// Remove from source, insert into destination. Preconditions were
    /// verified under the same lock; if the insert still fails the unit is
    /// put back where it came from before the error propagates.
    fn apply_move(store: &mut Store, unit_id: &str, from_id: &str, to_id: &str) -> Result<()> {
        let unit = store.update_container(from_id, |c| c.remove_unit(unit_id))?;
        let fallback = unit.clone();
        if let Err(err) = store.update_container(to_id, |c| c.push_unit(unit)) {
            store
                .update_container(from_id, |c| c.push_unit(fallback))
                .ok();
            return Err(err);
        }
        Ok(())
    }

    fn undo_move(&self, store: &mut Store, action: &TransferAction) -> Result<Notification> {
        let to_id = action.to_container_id.as_deref().ok_or_else(|| {
            TraceError::Validation("move entry without a destination".to_string())
        })?;

        let origin = store.find_container(&action.from_container_id)?;
        if origin.is_full() {
            return Err(TraceError::InvalidTarget(format!(
                "container {} is full",
                action.from_container_id
            )));
        }
        if !store.find_container(to_id)?.contains_unit(&action.unit_id) {
            return Err(TraceError::UnitNotFound {
                unit_id: action.unit_id.clone(),
                container_id: to_id.to_string(),
            });
        }

        Self::apply_move(store, &action.unit_id, to_id, &action.from_container_id)?;
        Ok(Notification::success(format!(
            "Returned {} to {}",
            action.unit_id, action.from_container_id
        )))
    }

    fn undo_scrap(&self, store: &mut Store, action: &TransferAction) -> Result<Notification> {
        if store.find_container(&action.from_container_id)?.is_full() {
            return Err(TraceError::InvalidTarget(format!(
                "container {} is full",
                action.from_container_id
            )));
        }

        let mut unit = store.take_scrap(&action.unit_id)?;
        unit.restore(&action.from_container_id);
        let fallback = unit.clone();
        if let Err(err) =
            store.update_container(&action.from_container_id, |c| c.push_unit(unit))
        {
            let mut scrapped = fallback;
            scrapped.mark_damaged();
            store.push_scrap(scrapped);
            return Err(err);
        }

        Ok(Notification::success(format!(
            "Restored {} to {}",
            action.unit_id, action.from_container_id
        )))
    }
}
