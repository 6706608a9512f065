//! Collaborator interfaces implemented outside the domain crate.
//!
//! The persistence crate implements the store traits against PostgreSQL;
//! tests substitute in-memory doubles.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewPageView, NewRegistrant, Registrant};

/// Failure reported by a store collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Query failed: {0}")]
    Query(String),
}

/// Insert-only storage for registrants.
#[async_trait]
pub trait RegistrantStore: Send + Sync {
    /// Insert one registrant; the store assigns `id` and `created_at`.
    async fn insert_registrant(&self, registrant: &NewRegistrant)
        -> Result<Registrant, StoreError>;
}

/// Append-only storage for page views plus its aggregate counters.
#[async_trait]
pub trait PageViewStore: Send + Sync {
    async fn insert_view(&self, view: &NewPageView) -> Result<(), StoreError>;

    /// Total number of recorded views.
    async fn count_views(&self) -> Result<i64, StoreError>;

    /// Number of distinct client addresses among recorded views.
    async fn count_distinct_visitors(&self) -> Result<i64, StoreError>;
}

/// Idempotent schema setup and liveness probing of the backing store.
#[async_trait]
pub trait SchemaProvisioner: Send + Sync {
    /// Create tables and indexes if they do not exist yet.
    async fn provision(&self) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
