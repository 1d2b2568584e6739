//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    DeliveryStatus, RankAlternativesCommand, RankAlternativesHandler, RankAlternativesResult,
    RankError,
};
