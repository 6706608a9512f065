//! Registrant repository for database operations.

use async_trait::async_trait;
use domain::models::{NewRegistrant, Registrant};
use domain::ports::{RegistrantStore, StoreError};
use sqlx::PgPool;

use crate::db::to_store_error;
use crate::entities::RegistrantEntity;
use crate::metrics::QueryTimer;

/// Repository for registrant rows. Insert-only.
#[derive(Clone)]
pub struct RegistrantRepository {
    pool: PgPool,
}

impl RegistrantRepository {
    /// Creates a new RegistrantRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registrant; the database assigns `id` and `created_at`.
    pub async fn insert(&self, new: &NewRegistrant) -> Result<RegistrantEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_registrant");
        let result = sqlx::query_as::<_, RegistrantEntity>(
            r#"
            INSERT INTO registros (nombre, apellido, whatsapp, email, fecha_viaje, tratamiento_datos, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id, nombre, apellido, whatsapp, email, fecha_viaje, tratamiento_datos, created_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.last_name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.travel_date)
        .bind(new.consent)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl RegistrantStore for RegistrantRepository {
    async fn insert_registrant(&self, new: &NewRegistrant) -> Result<Registrant, StoreError> {
        self.insert(new)
            .await
            .map(Registrant::from)
            .map_err(to_store_error)
    }
}
