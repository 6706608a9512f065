//! Domain layer for the Minca Mágica intake backend.
//!
//! This crate contains:
//! - Domain models (Registrant, PageView)
//! - Collaborator ports (stores, schema provisioning)
//! - Business logic services (rate limiting, registration intake, analytics)

pub mod models;
pub mod ports;
pub mod services;
