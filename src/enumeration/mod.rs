//! Enumerations over a fixed, append-only universe of names.
//!
//! - [`Enumeration`]: selection of a subset of the universe, bounded by a cap
//! - [`TriStateEnumeration`]: classification of every name into exactly one
//!   of include, exclude or ignore

pub mod error;
mod select;
mod tri;

pub use error::EnumError;
pub use select::Enumeration;
pub use tri::{Classification, TriStateEnumeration};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A universe name together with its associated value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub value: Value,
}

/// Value stored for a name added without one.
pub(crate) fn default_value() -> Value {
    Value::Bool(true)
}
