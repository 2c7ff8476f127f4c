use thiserror::Error;

pub type Result<T> = std::result::Result<T, TraceError>;

/// Error taxonomy for traceability operations.
///
/// Every variant is terminal for a single operation only: a failed move or
/// scrap never leaves the repository or the action log partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Unit {unit_id} not found in container {container_id}")]
    UnitNotFound {
        unit_id: String,
        container_id: String,
    },

    #[error("Cannot move to this container: {0}")]
    InvalidTarget(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Nothing to undo")]
    NothingToUndo,
}
