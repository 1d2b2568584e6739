//! Analysis Module - Pure domain services for multi-criteria ranking.
//!
//! This module contains stateless functions that operate on domain objects
//! to rank alternatives against weighted criteria.
//!
//! # Components
//!
//! - `DecisionMatrix` - Alternatives (rows) x criteria (columns) of finite values
//! - `WeightVector` / `ImpactVector` - Per-criterion importance and direction
//! - `TopsisEngine` - Closeness-to-ideal scoring with dense ranking
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They borrow their
//! inputs and return newly allocated results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod criteria;
mod decision_matrix;
mod errors;
mod ranking;
mod topsis;

// Re-export all public types
pub use criteria::{ImpactVector, WeightVector};
pub use decision_matrix::{Alternative, DecisionMatrix, DecisionMatrixBuilder};
pub use errors::TopsisError;
pub use ranking::dense_rank;
pub use topsis::{IdealSolution, ScoredAlternative, TopsisEngine, TopsisEvaluation};
