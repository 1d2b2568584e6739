//! Result Delivery Port - Out-of-band delivery of a computed result.
//!
//! Delivery happens after the result is computed and stored. A delivery
//! failure never invalidates the result; callers report it as a warning.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("e-mail pattern is valid")
});

/// Port for delivering a result file to a recipient.
///
/// # Contract
///
/// Implementations must:
/// - Leave the attachment untouched
/// - Return `DeliveryFailure` for transport errors rather than panicking
#[async_trait]
pub trait ResultDelivery: Send + Sync {
    /// Sends the attachment to the recipient.
    async fn deliver(
        &self,
        recipient: &Recipient,
        attachment: &Attachment,
    ) -> Result<(), DeliveryError>;
}

/// A validated e-mail recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient(String);

impl Recipient {
    /// Validates an e-mail address.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::InvalidRecipient` if the address does not look
    /// like `local@domain.tld`.
    pub fn parse(address: &str) -> Result<Self, DeliveryError> {
        let address = address.trim();
        if EMAIL_PATTERN.is_match(address) {
            Ok(Self(address.to_string()))
        } else {
            Err(DeliveryError::InvalidRecipient {
                address: address.to_string(),
            })
        }
    }

    /// Returns the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl Attachment {
    /// Creates a new attachment.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content,
        }
    }
}

/// Errors raised by delivery channels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("Invalid recipient address: '{address}'")]
    InvalidRecipient { address: String },

    #[error("Delivery failed: {reason}")]
    DeliveryFailure { reason: String },

    #[error("No delivery channel is configured")]
    NotConfigured,
}

impl DeliveryError {
    /// Creates a delivery failure.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::DeliveryFailure {
            reason: reason.into(),
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidRecipient { .. } => ErrorCode::InvalidRecipient,
            Self::DeliveryFailure { .. } | Self::NotConfigured => ErrorCode::DeliveryFailure,
        }
    }
}
