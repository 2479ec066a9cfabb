//! Checkpoints: versioned, timestamped envelopes around a model snapshot.
//!
//! A checkpoint records which kind of model it was taken from, so it can
//! be persisted as JSON and later applied only to a model of the same kind.

use crate::core::{Model, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a model's persistent state.
/// Does NOT include listeners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub taken_at: DateTime<Utc>,

    /// Kind tag of the model the snapshot came from
    pub kind: String,

    pub snapshot: Snapshot,
}

impl Checkpoint {
    /// Extract `model` into a new checkpoint.
    pub fn capture(model: &dyn Model) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            kind: model.kind().to_string(),
            snapshot: model.extract(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse a checkpoint, rejecting any format version other than
    /// [`CHECKPOINT_VERSION`].
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;

        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        Ok(checkpoint)
    }

    /// Restore `model` from this checkpoint.
    pub fn apply_to(&self, model: &mut dyn Model) -> Result<(), CheckpointError> {
        if model.kind() != self.kind {
            return Err(CheckpointError::KindMismatch {
                expected: model.kind(),
                found: self.kind.clone(),
            });
        }

        tracing::debug!(id = %self.id, kind = %self.kind, "applying checkpoint");
        model.restore(&self.snapshot)?;
        Ok(())
    }
}
