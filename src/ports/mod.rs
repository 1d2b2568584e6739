//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Input
//!
//! - `DecisionMatrixReader` - Parses uploaded tables into a decision matrix
//!
//! ## Output
//!
//! - `ResultWriter` - Serializes a ranking back into a table
//! - `ResultStore` - Keeps serialized results available for download
//! - `ResultDelivery` - Out-of-band delivery (e-mail) of a stored result

mod matrix_reader;
mod result_delivery;
mod result_store;
mod result_writer;

pub use matrix_reader::{DecisionMatrixReader, InputError, MIN_COLUMNS};
pub use result_delivery::{Attachment, DeliveryError, Recipient, ResultDelivery};
pub use result_store::{
    is_safe_result_name, result_name_for, ResultStore, StorageError, StoredResult,
};
pub use result_writer::{OutputError, ResultWriter, RANK_COLUMN, SCORE_COLUMN};
