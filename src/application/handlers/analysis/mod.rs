//! Analysis handlers.
//!
//! Handlers that run TOPSIS over uploaded decision tables.

mod rank_alternatives;

pub use rank_alternatives::{
    DeliveryStatus, RankAlternativesCommand, RankAlternativesHandler, RankAlternativesResult,
    RankError,
};
