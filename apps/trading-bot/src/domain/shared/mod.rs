//! Shared Domain Types
//!
//! Value objects and errors shared across the domain.

pub mod errors;
pub mod value_objects;

pub use errors::ValidationError;
pub use value_objects::{OrderId, Symbol};
