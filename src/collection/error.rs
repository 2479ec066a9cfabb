//! Collection error types.

use thiserror::Error;

/// Errors returned by the keyed item operations on a list.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListError {
    #[error("Index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Item {index} is not an object and has no keys")]
    NotAnObject { index: usize },
}
