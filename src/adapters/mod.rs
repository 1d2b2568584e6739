//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `tabular` - CSV and Excel input, CSV output
//! - `storage` - Result file stores (local disk, in-memory)
//! - `email` - Result delivery (Resend, in-memory, disabled)
//! - `http` - Axum REST API

pub mod email;
pub mod http;
pub mod storage;
pub mod tabular;

pub use email::{delivery_from_config, DisabledDelivery, InMemoryDelivery, ResendDelivery};
pub use storage::{InMemoryResultStore, LocalResultStore};
pub use tabular::{CsvMatrixReader, CsvResultWriter, XlsxMatrixReader};
