//! Production line grouping

use serde::{Deserialize, Serialize};

use crate::container::ActiveContainer;

/// A named production line grouping containers. The rollup counters are
/// display-only aggregates, not authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionLine {
    pub id: String,
    pub name: String,
    pub containers: Vec<ActiveContainer>,
    pub completed_today: u32,
    pub errors_today: u32,
}

impl ProductionLine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            containers: Vec::new(),
            completed_today: 0,
            errors_today: 0,
        }
    }

    pub fn with_containers(mut self, containers: Vec<ActiveContainer>) -> Self {
        self.containers = containers;
        self
    }
}
