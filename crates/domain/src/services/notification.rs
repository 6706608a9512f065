//! Notification service abstraction for staff emails.
//!
//! Delivery is best effort: a notifier reports its outcome as a value and
//! never fails the operation that triggered it.

use std::sync::{Arc, Mutex, PoisonError};

/// Message addressed to a fixed list of recipients.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    pub to: Vec<String>,
    pub subject: String,
    /// Plain text body
    pub body_text: String,
    /// HTML body (optional)
    pub body_html: Option<String>,
}

/// Result of a notification send attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationResult {
    /// The provider accepted the message.
    Sent { message_id: Option<String> },
    /// Sending failed; the reason is only logged.
    Failed(String),
    /// Nothing was sent (notifications disabled or no recipients).
    Skipped,
}

impl NotificationResult {
    /// True only when the provider confirmed the message.
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationResult::Sent { .. })
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            NotificationResult::Sent { .. } => "sent",
            NotificationResult::Failed(_) => "failed",
            NotificationResult::Skipped => "skipped",
        }
    }
}

/// Outbound notification transport.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: NotificationMessage) -> NotificationResult;
}

/// Mock notifier for development and testing.
///
/// Records every message it is asked to send; nothing leaves the process.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
    sent: Arc<Mutex<Vec<NotificationMessage>>>,
}

impl MockNotifier {
    /// Create a new mock notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock notifier that reports every send as failed.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Messages passed to `send`, including failed ones.
    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, message: NotificationMessage) -> NotificationResult {
        let recipients = message.to.len();
        let subject = message.subject.clone();
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);

        if self.simulate_failure {
            tracing::warn!(
                recipients = recipients,
                subject = %subject,
                "Mock notifier simulating failure"
            );
            return NotificationResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            recipients = recipients,
            subject = %subject,
            "Mock: Would send notification"
        );

        NotificationResult::Sent {
            message_id: Some(format!("mock-{}", self.call_count())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> NotificationMessage {
        NotificationMessage {
            to: vec!["staff@example.com".to_string()],
            subject: "Test".to_string(),
            body_text: "Body".to_string(),
            body_html: None,
        }
    }

    #[test]
    fn test_notification_result_is_sent() {
        assert!(NotificationResult::Sent { message_id: None }.is_sent());
        assert!(!NotificationResult::Failed("x".to_string()).is_sent());
        assert!(!NotificationResult::Skipped.is_sent());
    }

    #[test]
    fn test_notification_result_label() {
        assert_eq!(NotificationResult::Sent { message_id: None }.label(), "sent");
        assert_eq!(NotificationResult::Failed("x".into()).label(), "failed");
        assert_eq!(NotificationResult::Skipped.label(), "skipped");
    }

    #[tokio::test]
    async fn test_mock_notifier_send() {
        let notifier = MockNotifier::new();
        let result = notifier.send(message()).await;
        assert_eq!(
            result,
            NotificationResult::Sent {
                message_id: Some("mock-1".to_string())
            }
        );
        assert_eq!(notifier.call_count(), 1);
        assert_eq!(notifier.messages()[0].subject, "Test");
    }

    #[tokio::test]
    async fn test_mock_notifier_failure_still_records() {
        let notifier = MockNotifier::failing();
        let result = notifier.send(message()).await;
        assert!(matches!(result, NotificationResult::Failed(_)));
        assert_eq!(notifier.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_notifier_clones_share_log() {
        let notifier = MockNotifier::new();
        let clone = notifier.clone();
        clone.send(message()).await;
        assert_eq!(notifier.call_count(), 1);
    }
}
