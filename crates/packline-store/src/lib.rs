//! In-memory state for packline
//!
//! This crate provides:
//! - The container repository (production lines, containers, scrap)
//! - The append-only action log
//!
//! Persistence is deliberately absent: all state lives for one session.
//! A backend sync service would sit behind these types if productionized.

pub mod log;
pub mod store;

pub use log::{lock_log, ActionLog, SharedLog};
pub use store::{lock_store, SharedStore, Store};
