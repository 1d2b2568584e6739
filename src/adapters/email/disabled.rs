//! Disabled Delivery - Used when no e-mail provider is configured.

use async_trait::async_trait;

use crate::ports::{Attachment, DeliveryError, Recipient, ResultDelivery};

/// Rejects every delivery with `NotConfigured`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledDelivery;

#[async_trait]
impl ResultDelivery for DisabledDelivery {
    async fn deliver(
        &self,
        _recipient: &Recipient,
        _attachment: &Attachment,
    ) -> Result<(), DeliveryError> {
        Err(DeliveryError::NotConfigured)
    }
}
