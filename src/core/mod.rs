//! Core model contract.
//!
//! This module contains the pieces every container is built from:
//! - The listener registry and the `Observable` notification channel
//! - Static schema descriptors declaring a container's persistent fields
//! - The `Model` contract (reset/extract/restore) derived from a schema
//! - The plain `Snapshot` structure exchanged by extract and restore

mod error;
mod model;
mod observable;
mod schema;
mod snapshot;

pub use error::SnapshotError;
pub use model::Model;
pub use observable::{Listener, ListenerId, Listeners, Observable};
pub use schema::{check_schema, Field, FieldKind, Nested, ReadFn, ResetFn, Schema, Slot, WriteFn};
pub use snapshot::{assign, decode, encode, Snapshot};
