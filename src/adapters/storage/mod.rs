//! Storage Adapters
//!
//! Implementations of the ResultStore port.
//!
//! ## Available Adapters
//!
//! - **LocalResultStore** - Stores result files in a directory on disk
//! - **InMemoryResultStore** - Stores results in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryResultStore, LocalResultStore};
//!
//! // Production: file-based storage
//! let store = LocalResultStore::new("./results");
//!
//! // Testing: in-memory storage
//! let store = InMemoryResultStore::new();
//! ```

mod in_memory_result_store;
mod local_result_store;

pub use in_memory_result_store::InMemoryResultStore;
pub use local_result_store::LocalResultStore;
