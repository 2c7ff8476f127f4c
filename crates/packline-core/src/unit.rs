//! Unit domain model

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Category of a tracked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitKind {
    Bottle,
}

impl Default for UnitKind {
    fn default() -> Self {
        Self::Bottle
    }
}

/// Lifecycle status of a unit. `Damaged` is terminal: a damaged unit never
/// re-enters a container through the normal transfer path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    Packed,
    Damaged,
}

/// A single physical, individually identified item (e.g. one bottle).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    pub id: String,
    pub kind: UnitKind,
    /// Id of the container currently holding this unit, `None` when
    /// unassigned or scrapped.
    pub parent_id: Option<String>,
    pub batch_id: String,
    pub status: UnitStatus,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
}

impl Unit {
    pub fn new(id: impl Into<String>, batch_id: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: id.into(),
            kind: UnitKind::Bottle,
            parent_id: None,
            batch_id: batch_id.into(),
            status: UnitStatus::Packed,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Refresh `updated_at`; called on every state transition.
    pub fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }

    /// Mark the unit as damaged and detach it from any container.
    /// Damaged units always have `parent_id == None`.
    pub fn mark_damaged(&mut self) {
        self.status = UnitStatus::Damaged;
        self.parent_id = None;
        self.touch();
    }

    /// Restore a previously scrapped unit into circulation.
    pub fn restore(&mut self, parent_id: impl Into<String>) {
        self.status = UnitStatus::Packed;
        self.parent_id = Some(parent_id.into());
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damaged_unit_has_no_parent() {
        let mut unit = Unit::new("BTL-1", "BATCH-1").with_parent("CASE-1");
        assert_eq!(unit.parent_id.as_deref(), Some("CASE-1"));

        unit.mark_damaged();
        assert_eq!(unit.status, UnitStatus::Damaged);
        assert_eq!(unit.parent_id, None);
    }

    #[test]
    fn restore_reverses_scrap() {
        let mut unit = Unit::new("BTL-1", "BATCH-1");
        unit.mark_damaged();
        unit.restore("CASE-2");
        assert_eq!(unit.status, UnitStatus::Packed);
        assert_eq!(unit.parent_id.as_deref(), Some("CASE-2"));
    }
}
