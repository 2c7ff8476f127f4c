//! In-memory container repository

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use packline_core::{
    search_containers, ActiveContainer, ProductionLine, Result, TraceError, Unit,
};

/// Authoritative in-memory set of production lines, their containers, and
/// the scrap collection. All membership changes route through
/// [`Store::update_container`]; nothing else hands out mutable containers.
#[derive(Debug, Default, Serialize)]
pub struct Store {
    lines: Vec<ProductionLine>,
    scrap: Vec<Unit>,
}

/// Shared handle used by the transfer engine and the simulation driver.
/// One lock is held for the duration of a single operation, which is what
/// makes each move/scrap/tick atomic on a multi-threaded runtime.
pub type SharedStore = Arc<Mutex<Store>>;

/// Lock a shared store, recovering the guard if a previous holder panicked.
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn add_line(&mut self, line: ProductionLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[ProductionLine] {
        &self.lines
    }

    /// All containers across every line, in line order.
    pub fn containers(&self) -> impl Iterator<Item = &ActiveContainer> {
        self.lines.iter().flat_map(|l| l.containers.iter())
    }

    pub fn find_container(&self, id: &str) -> Result<&ActiveContainer> {
        self.containers()
            .find(|c| c.id == id)
            .ok_or_else(|| TraceError::ContainerNotFound(id.to_string()))
    }

    /// Apply one transformation to one container. This is the single
    /// mutation entry point; the capacity/status invariants hold because
    /// the container only exposes invariant-preserving mutators.
    pub fn update_container<T>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut ActiveContainer) -> Result<T>,
    ) -> Result<T> {
        let container = self
            .lines
            .iter_mut()
            .flat_map(|l| l.containers.iter_mut())
            .find(|c| c.id == id)
            .ok_or_else(|| TraceError::ContainerNotFound(id.to_string()))?;
        f(container)
    }

    /// Containers whose id, or any held unit's id, matches the query
    /// (case-insensitive substring).
    pub fn search(&self, query: &str) -> Vec<&ActiveContainer> {
        search_containers(&self.lines, query)
    }

    pub fn scrap(&self) -> &[Unit] {
        &self.scrap
    }

    pub fn push_scrap(&mut self, unit: Unit) {
        tracing::debug!(unit_id = %unit.id, "unit moved to scrap collection");
        self.scrap.push(unit);
    }

    /// Remove a unit from the scrap collection, for compensating undo.
    pub fn take_scrap(&mut self, unit_id: &str) -> Result<Unit> {
        let idx = self
            .scrap
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| TraceError::UnitNotFound {
                unit_id: unit_id.to_string(),
                container_id: "scrap".to_string(),
            })?;
        Ok(self.scrap.remove(idx))
    }
}
