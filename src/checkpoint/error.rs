//! Checkpoint error types.

use crate::core::SnapshotError;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint was taken from a different kind of model
    #[error("Checkpoint of kind '{found}' cannot be applied to a '{expected}' model")]
    KindMismatch {
        expected: &'static str,
        found: String,
    },

    /// The snapshot inside the checkpoint could not be restored
    #[error("Restore failed: {0}")]
    RestoreFailed(#[from] SnapshotError),
}
