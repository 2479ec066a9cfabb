//! Collection containers.
//!
//! - [`List`]: ordered JSON items with a working copy and an original copy
//! - [`Set`]: name-keyed values

pub mod error;
mod list;
mod set;

pub use error::ListError;
pub use list::List;
pub use set::Set;
