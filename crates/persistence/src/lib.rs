//! Persistence layer for the Minca Mágica intake service.
//!
//! This crate contains:
//! - Database connection management
//! - Idempotent schema provisioning
//! - Entity definitions (database row mappings)
//! - Repository implementations of the domain store ports

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod schema;
