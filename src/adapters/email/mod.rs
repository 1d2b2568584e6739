//! E-mail adapters - Implementations of the ResultDelivery port.
//!
//! - `ResendDelivery` - Sends results through the Resend HTTP API
//! - `InMemoryDelivery` - Records deliveries (testing/development)
//! - `DisabledDelivery` - Used when no e-mail provider is configured

mod disabled;
mod in_memory;
mod resend;

pub use disabled::DisabledDelivery;
pub use in_memory::{InMemoryDelivery, SentMessage};
pub use resend::ResendDelivery;

use std::sync::Arc;

use crate::config::EmailConfig;
use crate::ports::{DeliveryError, ResultDelivery};

/// Picks the delivery channel for an optional e-mail configuration.
///
/// # Errors
///
/// Returns `DeliveryFailure` if a configured channel cannot be created.
pub fn delivery_from_config(
    config: Option<&EmailConfig>,
) -> Result<Arc<dyn ResultDelivery>, DeliveryError> {
    match config {
        Some(config) => Ok(Arc::new(ResendDelivery::from_config(config)?)),
        None => Ok(Arc::new(DisabledDelivery)),
    }
}
