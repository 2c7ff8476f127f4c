//! Drag-and-drop adapter
//!
//! Holds the in-flight drag gesture and forwards completed drops into the
//! transfer engine. This is the inbound contract the grid UI calls; it owns
//! no container state of its own.

use packline_core::{Result, TraceError};

use crate::notify::Notification;
use crate::TransferEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub unit_id: String,
    pub container_id: String,
}

pub struct DragController {
    engine: TransferEngine,
    active: Option<DragState>,
}

impl DragController {
    pub fn new(engine: TransferEngine) -> Self {
        Self {
            engine,
            active: None,
        }
    }

    /// Begin dragging a unit out of a container. Starting a new drag
    /// replaces any gesture still in flight.
    pub fn start_drag(&mut self, unit_id: impl Into<String>, container_id: impl Into<String>) {
        self.active = Some(DragState {
            unit_id: unit_id.into(),
            container_id: container_id.into(),
        });
    }

    pub fn active(&self) -> Option<&DragState> {
        self.active.as_ref()
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Complete the gesture over a container. The drag ends either way;
    /// a rejected drop leaves the unit where it started.
    pub fn drop_on_container(&mut self, container_id: &str) -> Result<Notification> {
        let drag = self.take_active()?;
        self.engine
            .move_unit(&drag.unit_id, &drag.container_id, container_id)
    }

    /// Complete the gesture over the scrap zone.
    pub fn drop_on_scrap(&mut self, reason: Option<String>) -> Result<Notification> {
        let drag = self.take_active()?;
        self.engine
            .scrap_unit(&drag.unit_id, &drag.container_id, reason)
    }

    fn take_active(&mut self) -> Result<DragState> {
        self.active
            .take()
            .ok_or_else(|| TraceError::Validation("no drag in progress".to_string()))
    }
}
