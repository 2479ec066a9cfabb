//! Snapshot and schema error types.

use thiserror::Error;

/// Errors that can occur while restoring a snapshot or validating a schema.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A field value could not be decoded into the field's type
    #[error("Field '{field}' could not be restored: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A sub-model entry was present but was not a JSON object
    #[error("Sub-model entry '{field}' is not an object")]
    NotAnObject { field: &'static str },

    /// The snapshot carries state for a sub-model the target does not hold
    #[error("Snapshot has state for sub-model '{field}' but the model has none")]
    MissingSubModel { field: &'static str },

    /// The same field name is declared more than once in a schema
    #[error("Field '{field}' is declared more than once")]
    DuplicateField { field: &'static str },

    /// The value handed over as a snapshot is not a JSON object
    #[error("Snapshot must be a JSON object")]
    InvalidShape,
}
