//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary
//! of the ranking domain.

mod errors;
mod impact;

pub use errors::{ErrorCode, ValidationError};
pub use impact::Impact;
