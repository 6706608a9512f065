//! Registrant domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person who submitted the booking-intake form.
///
/// Rows are immutable once inserted; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub consent: bool,
    pub travel_date: String,
    pub created_at: DateTime<Utc>,
}

/// Registrant fields handed to the store for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistrant {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub consent: bool,
    pub travel_date: String,
}

/// Raw intake form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub travel_date: String,
    pub consent: bool,
}

impl RegistrationInput {
    /// True if any of the required text fields is empty.
    pub fn has_missing_fields(&self) -> bool {
        [
            &self.name,
            &self.last_name,
            &self.phone,
            &self.email,
            &self.travel_date,
        ]
        .iter()
        .any(|field| field.is_empty())
    }
}

impl From<RegistrationInput> for NewRegistrant {
    fn from(input: RegistrationInput) -> Self {
        Self {
            name: input.name,
            last_name: input.last_name,
            phone: input.phone,
            email: input.email,
            consent: input.consent,
            travel_date: input.travel_date,
        }
    }
}

/// Result of a successful intake.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOutcome {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    /// Whether the notifier confirmed delivery of the staff notification.
    pub email_sent: bool,
}
