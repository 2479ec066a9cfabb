//! Enumeration error types.

use thiserror::Error;

/// Errors raised by enumeration containers.
///
/// Every variant aborts the operation before any state is touched or any
/// listener is notified.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EnumError {
    /// The name is not part of the enumeration's universe
    #[error("Name '{name}' is not a valid entry of enumeration '{model}'")]
    NotAllowed { model: String, name: String },

    /// Selecting one more entry would exceed the selection cap
    #[error("Too many selections (allowed: {max}, currently: {current})")]
    TooManySelections { max: usize, current: usize },

    /// A single-selection query was made while several entries are selected
    #[error("Expected at most one selection, found {count}")]
    MultipleSelected { count: usize },

    /// The classification tag is not one of include, exclude or ignore
    #[error("Invalid classification '{target}', expected one of: include, exclude, ignore")]
    InvalidTarget { target: String },
}
