//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (impact direction, error codes)
//! - `analysis` - Pure domain services for decision analysis (TOPSIS)

pub mod analysis;
pub mod foundation;
