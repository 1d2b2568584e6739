//! In-Memory Delivery - Records deliveries instead of sending them.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{Attachment, DeliveryError, Recipient, ResultDelivery};

/// A recorded delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub recipient: String,
    pub attachment: Attachment,
}

/// Delivery channel that keeps every message in memory.
///
/// Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDelivery {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    failure: Option<String>,
}

impl InMemoryDelivery {
    /// Creates a channel that accepts every delivery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a channel that rejects every delivery with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(reason.into()),
        }
    }

    /// Returns the messages delivered so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ResultDelivery for InMemoryDelivery {
    async fn deliver(
        &self,
        recipient: &Recipient,
        attachment: &Attachment,
    ) -> Result<(), DeliveryError> {
        if let Some(reason) = &self.failure {
            return Err(DeliveryError::failure(reason.clone()));
        }

        self.sent
            .lock()
            .map_err(|_| DeliveryError::failure("outbox lock poisoned"))?
            .push(SentMessage {
                recipient: recipient.as_str().to_string(),
                attachment: attachment.clone(),
            });
        Ok(())
    }
}
