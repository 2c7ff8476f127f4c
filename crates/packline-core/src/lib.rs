//! Core domain models for packline
//!
//! This crate contains:
//! - Domain models (Unit, ActiveContainer, ProductionLine, TransferAction)
//! - The error taxonomy shared by every traceability operation
//! - Stateless search and rollup helpers

pub mod action;
pub mod container;
pub mod error;
pub mod line;
pub mod stats;
pub mod unit;

pub use action::{ActionKind, TransferAction};
pub use container::{ActiveContainer, ContainerStatus};
pub use error::{Result, TraceError};
pub use line::ProductionLine;
pub use stats::{search_containers, LineStats};
pub use unit::{Unit, UnitKind, UnitStatus};
