//! Registration intake: rate check, validation, persistence, notification.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::{Registrant, RegistrationInput, RegistrationOutcome};
use crate::ports::{RegistrantStore, StoreError};
use crate::services::notification::{NotificationResult, Notifier};
use crate::services::rate_limit::{RateDecision, RateLimitStore};
use crate::services::registration_email::build_registration_notification;

/// Message returned when any required field is empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Todos los campos son requeridos";

/// Errors surfaced by [`RegistrationService::register`].
///
/// Notification failures are not represented here: they never fail an intake.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] StoreError),
}

impl From<validator::ValidationError> for RegistrationError {
    fn from(err: validator::ValidationError) -> Self {
        let message = err
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string());
        RegistrationError::InvalidInput(message)
    }
}

/// Orchestrates one registration attempt.
///
/// The rate limiter is owned by the service so it can be swapped for a
/// shared implementation without touching the intake flow.
pub struct RegistrationService {
    rate_limiter: Arc<dyn RateLimitStore>,
    store: Arc<dyn RegistrantStore>,
    notifier: Arc<dyn Notifier>,
    recipients: Vec<String>,
}

impl RegistrationService {
    pub fn new(
        rate_limiter: Arc<dyn RateLimitStore>,
        store: Arc<dyn RegistrantStore>,
        notifier: Arc<dyn Notifier>,
        recipients: Vec<String>,
    ) -> Self {
        Self {
            rate_limiter,
            store,
            notifier,
            recipients,
        }
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Validate, persist and announce one registrant.
    ///
    /// Nothing is written when the client is rate limited or the input is
    /// invalid. Once the insert succeeds the intake is committed; the
    /// notification outcome only sets `email_sent`.
    pub async fn register(
        &self,
        input: RegistrationInput,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        if self.rate_limiter.check_and_consume(client_id, now) == RateDecision::Rejected {
            let retry_after_secs = self
                .rate_limiter
                .retry_after(client_id, now)
                .map(|d| d.num_seconds().max(1) as u64)
                .unwrap_or(1);
            warn!(client_id = %client_id, retry_after_secs, "Registration rate limit exceeded");
            return Err(RegistrationError::RateLimited { retry_after_secs });
        }

        validate_input(&input)?;

        let registrant = self
            .store
            .insert_registrant(&input.into())
            .await
            .map_err(|e| {
                error!(client_id = %client_id, error = %e, "Failed to store registrant");
                RegistrationError::PersistenceFailure(e)
            })?;

        info!(
            registrant_id = registrant.id,
            travel_date = %registrant.travel_date,
            "Registrant stored"
        );

        let email_sent = self.notify(&registrant).await.is_sent();

        Ok(RegistrationOutcome {
            id: registrant.id,
            created_at: registrant.created_at,
            email_sent,
        })
    }

    /// Sends the staff notification on a detached task so that a dropped
    /// request cannot cancel it after the registrant is committed.
    async fn notify(&self, registrant: &Registrant) -> NotificationResult {
        if self.recipients.is_empty() {
            debug!(registrant_id = registrant.id, "No notification recipients configured");
            return NotificationResult::Skipped;
        }

        let message = build_registration_notification(registrant, &self.recipients);
        let notifier = Arc::clone(&self.notifier);
        let result = match tokio::spawn(async move { notifier.send(message).await }).await {
            Ok(result) => result,
            Err(join_err) => NotificationResult::Failed(format!("notifier task: {}", join_err)),
        };

        match &result {
            NotificationResult::Sent { message_id } => info!(
                registrant_id = registrant.id,
                message_id = ?message_id,
                "Registration notification sent"
            ),
            NotificationResult::Failed(reason) => warn!(
                registrant_id = registrant.id,
                reason = %reason,
                "Registration notification failed"
            ),
            NotificationResult::Skipped => debug!(
                registrant_id = registrant.id,
                "Registration notification skipped"
            ),
        }

        result
    }
}

/// Required fields first, then email shape, then phone shape.
fn validate_input(input: &RegistrationInput) -> Result<(), RegistrationError> {
    if input.has_missing_fields() {
        return Err(RegistrationError::InvalidInput(
            MISSING_FIELDS_MESSAGE.to_string(),
        ));
    }
    shared::validation::validate_email(&input.email)?;
    shared::validation::validate_colombian_phone(&input.phone)?;
    Ok(())
}
