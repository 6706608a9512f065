//! HTTP route handlers.

pub mod checkout;
pub mod health;
pub mod public_config;
pub mod registration;
pub mod setup;
pub mod views;
