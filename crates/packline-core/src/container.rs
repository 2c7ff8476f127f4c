//! Container domain model
//!
//! Fill level and open/full status are computed from `children`, never
//! stored. Every mutation goes through `push_unit`/`remove_unit`, which
//! enforce the capacity invariant at the type level.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{Result, TraceError};
use crate::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerStatus {
    Open,
    Full,
}

/// A case/box holding units, with a fixed capacity set at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveContainer {
    pub id: String,
    pub capacity: usize,
    children: Vec<Unit>,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl ActiveContainer {
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        debug_assert!(capacity > 0, "container capacity must be positive");
        Self {
            id: id.into(),
            capacity,
            children: Vec::with_capacity(capacity),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Units currently held, in packing order.
    pub fn children(&self) -> &[Unit] {
        &self.children
    }

    /// Always equals `children().len()`; derived, never set.
    pub fn filled_count(&self) -> usize {
        self.children.len()
    }

    /// `Full` iff `filled_count() == capacity`. Pure function of the
    /// children, so it can never drift out of sync.
    pub fn status(&self) -> ContainerStatus {
        if self.children.len() == self.capacity {
            ContainerStatus::Full
        } else {
            ContainerStatus::Open
        }
    }

    pub fn is_full(&self) -> bool {
        self.status() == ContainerStatus::Full
    }

    pub fn contains_unit(&self, unit_id: &str) -> bool {
        self.children.iter().any(|u| u.id == unit_id)
    }

    pub fn find_unit(&self, unit_id: &str) -> Option<&Unit> {
        self.children.iter().find(|u| u.id == unit_id)
    }

    /// Append a unit, claiming ownership of it. Fails with `InvalidTarget`
    /// when the container is already at capacity; the unit is handed back
    /// inside the error path untouched by requiring the check up front.
    pub fn push_unit(&mut self, mut unit: Unit) -> Result<()> {
        if self.is_full() {
            return Err(TraceError::InvalidTarget(format!(
                "container {} is full ({}/{})",
                self.id, self.capacity, self.capacity
            )));
        }
        unit.parent_id = Some(self.id.clone());
        unit.touch();
        self.children.push(unit);
        Ok(())
    }

    /// Remove and return the named unit, or fail with `UnitNotFound`.
    /// The returned unit still carries this container as `parent_id`;
    /// the caller decides its next home.
    pub fn remove_unit(&mut self, unit_id: &str) -> Result<Unit> {
        let idx = self
            .children
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| TraceError::UnitNotFound {
                unit_id: unit_id.to_string(),
                container_id: self.id.clone(),
            })?;
        Ok(self.children.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str) -> Unit {
        Unit::new(id, "BATCH-1")
    }

    #[test]
    fn status_derives_from_fill_level() {
        let mut case = ActiveContainer::new("CASE-01", 2);
        assert_eq!(case.status(), ContainerStatus::Open);
        assert_eq!(case.filled_count(), 0);

        case.push_unit(unit("BTL-1")).unwrap();
        assert_eq!(case.status(), ContainerStatus::Open);

        case.push_unit(unit("BTL-2")).unwrap();
        assert_eq!(case.status(), ContainerStatus::Full);
        assert_eq!(case.filled_count(), 2);
    }

    #[test]
    fn push_sets_parent_id() {
        let mut case = ActiveContainer::new("CASE-01", 6);
        case.push_unit(unit("BTL-1")).unwrap();
        assert_eq!(
            case.find_unit("BTL-1").unwrap().parent_id.as_deref(),
            Some("CASE-01")
        );
    }

    #[test]
    fn push_into_full_container_is_rejected() {
        let mut case = ActiveContainer::new("CASE-01", 1);
        case.push_unit(unit("BTL-1")).unwrap();

        let err = case.push_unit(unit("BTL-2")).unwrap_err();
        assert!(matches!(err, TraceError::InvalidTarget(_)));
        assert_eq!(case.filled_count(), 1);
    }

    #[test]
    fn remove_unknown_unit_is_not_found() {
        let mut case = ActiveContainer::new("CASE-01", 6);
        let err = case.remove_unit("BTL-404").unwrap_err();
        assert!(matches!(err, TraceError::UnitNotFound { .. }));
    }

    #[test]
    fn remove_reopens_a_full_container() {
        let mut case = ActiveContainer::new("CASE-01", 1);
        case.push_unit(unit("BTL-1")).unwrap();
        assert_eq!(case.status(), ContainerStatus::Full);

        let removed = case.remove_unit("BTL-1").unwrap();
        assert_eq!(removed.id, "BTL-1");
        assert_eq!(case.status(), ContainerStatus::Open);
        assert_eq!(case.filled_count(), 0);
    }
}
