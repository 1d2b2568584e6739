//! Resend Delivery - Implementation of ResultDelivery over the Resend HTTP API.
//!
//! # Configuration
//!
//! ```ignore
//! let delivery = ResendDelivery::from_config(&app_config.email.unwrap())?;
//! delivery.deliver(&recipient, &attachment).await?;
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::config::EmailConfig;
use crate::ports::{Attachment, DeliveryError, Recipient, ResultDelivery};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body text of result mails.
const BODY_TEXT: &str = "Please find attached the results of your TOPSIS analysis.\n\n\
The attached file contains the original data along with the Topsis Score and Rank columns.";

/// Sends result files as e-mail attachments through Resend.
pub struct ResendDelivery {
    api_key: Secret<String>,
    from: String,
    subject: String,
    base_url: String,
    client: Client,
}

impl ResendDelivery {
    /// Creates a delivery channel from the e-mail configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryFailure` if the HTTP client cannot be built.
    pub fn from_config(config: &EmailConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| DeliveryError::failure(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: Secret::new(config.resend_api_key.clone()),
            from: config.from_header(),
            subject: config.subject.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Builds the send endpoint URL.
    fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }

    fn to_request<'a>(&'a self, recipient: &'a Recipient, attachment: &'a Attachment) -> SendEmailRequest<'a> {
        SendEmailRequest {
            from: &self.from,
            to: vec![recipient.as_str()],
            subject: &self.subject,
            text: BODY_TEXT,
            attachments: vec![EmailAttachment {
                filename: &attachment.filename,
                content: STANDARD.encode(&attachment.content),
            }],
        }
    }

    /// Maps a non-success response to a delivery failure.
    async fn handle_response_status(response: Response) -> Result<(), DeliveryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => DeliveryError::failure("Email provider rejected the API key"),
            422 => DeliveryError::failure(format!("Email provider rejected the message: {}", body)),
            429 => DeliveryError::failure("Email provider rate limit exceeded"),
            _ => DeliveryError::failure(format!("Unexpected status {}: {}", status, body)),
        })
    }
}

#[async_trait]
impl ResultDelivery for ResendDelivery {
    async fn deliver(
        &self,
        recipient: &Recipient,
        attachment: &Attachment,
    ) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.to_request(recipient, attachment))
            .send()
            .await
            .map_err(|e| DeliveryError::failure(format!("Request failed: {}", e)))?;

        Self::handle_response_status(response).await?;

        tracing::info!(recipient = %recipient, file = %attachment.filename, "Result e-mailed");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    attachments: Vec<EmailAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct EmailAttachment<'a> {
    filename: &'a str,
    content: String,
}
