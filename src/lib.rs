//! Rok: observable state models
//!
//! Rok is a family of small typed containers (text, number, boolean, object,
//! list, set, enumeration, tri-state enumeration and date range) that hold
//! mutable state and broadcast a payload-free notification after every
//! successful mutation. Listeners re-read whatever they need through the
//! container's getters.
//!
//! # Core Concepts
//!
//! - **Observable**: a listener registry with `watch`/`unwatch`/`notify`
//! - **Schema**: a static declaration of a container's persistent fields,
//!   split into scalar properties, deep-copied objects and sub-models
//! - **Model**: `reset`, `extract` and `restore`, derived from the schema
//! - **Checkpoint**: a versioned JSON envelope around an extracted snapshot
//!
//! # Example
//!
//! ```rust
//! use rok::enumeration::TriStateEnumeration;
//! use rok::{Model, Observable};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut status = TriStateEnumeration::new("status", "Status");
//! status.add("open", None);
//! status.add("closed", None);
//!
//! let changes = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&changes);
//! status.watch(move || seen.set(seen.get() + 1));
//!
//! status.set_include("open").unwrap();
//! assert!(status.is_included("open"));
//!
//! let snapshot = status.extract();
//! status.reset();
//! assert!(status.is_ignored("open"));
//!
//! status.restore(&snapshot).unwrap();
//! assert!(status.is_included("open"));
//! assert_eq!(changes.get(), 3);
//! ```

pub mod checkpoint;
pub mod collection;
pub mod core;
pub mod date_range;
pub mod enumeration;
pub mod scalar;

// Re-export commonly used types
pub use checkpoint::{Checkpoint, CheckpointError};
pub use collection::{List, Set};
pub use crate::core::{Model, Observable, Schema, Snapshot, SnapshotError};
pub use date_range::DateRange;
pub use enumeration::{Enumeration, TriStateEnumeration};
pub use scalar::{Boolean, Number, Object, Text};

pub mod prelude {
    pub use crate::checkpoint::Checkpoint;
    pub use crate::collection::{List, Set};
    pub use crate::core::{ListenerId, Model, Observable, Schema, Snapshot};
    pub use crate::date_range::DateRange;
    pub use crate::enumeration::{Classification, Enumeration, TriStateEnumeration};
    pub use crate::scalar::{Boolean, Number, Object, Text};
}
