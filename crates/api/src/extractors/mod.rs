//! Custom Axum extractors.
//!
//! Extractors for deriving client identity from request headers.

pub mod client_ip;

pub use client_ip::{ClientId, UserAgent, VisitorAddr, UNKNOWN_CLIENT};
