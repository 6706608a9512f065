//! Domain services for the intake backend.
//!
//! Services contain business logic that operates on domain models.

pub mod analytics;
pub mod notification;
pub mod rate_limit;
pub mod registration;
pub mod registration_email;

pub use analytics::AnalyticsService;
pub use notification::{MockNotifier, NotificationMessage, NotificationResult, Notifier};
pub use rate_limit::{FixedWindowRateLimiter, RateDecision, RateLimitStore};
pub use registration::{RegistrationError, RegistrationService};
