//! Domain models for the intake backend.

pub mod page_view;
pub mod registrant;

pub use page_view::{NewPageView, PageView, VisitStats};
pub use registrant::{NewRegistrant, Registrant, RegistrationInput, RegistrationOutcome};
