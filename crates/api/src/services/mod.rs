//! Adapters for external services.

pub mod email;

pub use email::{EmailError, EmailService};
