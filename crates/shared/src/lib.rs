//! Shared utilities for the Minca Mágica intake backend.
//!
//! This crate provides functionality used across the other crates:
//! - Form field validation (email shape, Colombian mobile numbers)
//! - Outbound contact link builders

pub mod links;
pub mod validation;
