//! Email notifier for registration alerts.
//!
//! Supports two providers:
//! - `console`: Logs emails instead of sending them (development)
//! - `resend`: Sends through the Resend HTTP API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::services::{NotificationMessage, NotificationResult, Notifier};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::EmailConfig;
use crate::middleware::metrics::record_notification;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Request body accepted by the Resend `/emails` endpoint.
#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: String,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

/// Email service implementing the registration [`Notifier`].
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    client: reqwest::Client,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Check if email service is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn from_header(&self) -> String {
        format!("{} <{}>", self.config.sender_name, self.config.sender_email)
    }

    /// Dispatches through the configured provider, returning the provider's message id.
    async fn deliver(&self, message: &NotificationMessage) -> Result<Option<String>, EmailError> {
        match self.config.provider.as_str() {
            "console" => Ok(self.send_console(message)),
            "resend" => self.send_resend(message).await,
            provider => Err(EmailError::NotConfigured(format!(
                "unknown provider '{}'",
                provider
            ))),
        }
    }

    /// Console provider - logs email to stdout.
    fn send_console(&self, message: &NotificationMessage) -> Option<String> {
        info!(
            from = %self.from_header(),
            to = ?message.to,
            subject = %message.subject,
            "📧 Email (console provider)"
        );
        debug!(body = %message.body_text, "Email body");
        None
    }

    /// Resend provider - POSTs JSON with a bearer API key.
    async fn send_resend(
        &self,
        message: &NotificationMessage,
    ) -> Result<Option<String>, EmailError> {
        if self.config.api_key.is_empty() {
            return Err(EmailError::NotConfigured("missing api key".to_string()));
        }

        let body = ResendRequest {
            from: self.from_header(),
            to: &message.to,
            subject: &message.subject,
            text: &message.body_text,
            html: message.body_html.as_deref(),
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(format!("Resend request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_body, "Resend API error");
            return Err(EmailError::ProviderError(format!(
                "Resend returned {}: {}",
                status, error_body
            )));
        }

        let parsed: ResendResponse = response
            .json()
            .await
            .map_err(|e| EmailError::ProviderError(format!("invalid Resend response: {}", e)))?;

        info!(
            to = ?message.to,
            message_id = ?parsed.id,
            "📧 Email sent via Resend"
        );
        Ok(parsed.id)
    }
}

#[async_trait]
impl Notifier for EmailService {
    async fn send(&self, message: NotificationMessage) -> NotificationResult {
        let result = if !self.config.enabled {
            debug!(subject = %message.subject, "Email service disabled, skipping send");
            NotificationResult::Skipped
        } else {
            match self.deliver(&message).await {
                Ok(message_id) => NotificationResult::Sent { message_id },
                Err(e) => NotificationResult::Failed(e.to_string()),
            }
        };
        record_notification(result.label());
        result
    }
}
