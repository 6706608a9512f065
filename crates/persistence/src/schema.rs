//! Idempotent schema provisioning.
//!
//! Every statement is `IF NOT EXISTS`, so provisioning can run on each
//! startup and from the setup endpoint without harm.

use async_trait::async_trait;
use domain::ports::{SchemaProvisioner, StoreError};
use sqlx::PgPool;
use tracing::info;

use crate::db::to_store_error;

/// Provisioning statements, executed in order.
pub const SCHEMA_STATEMENTS: [(&str, &str); 7] = [
    (
        "create_registros",
        r#"
        CREATE TABLE IF NOT EXISTS registros (
            id SERIAL PRIMARY KEY,
            nombre VARCHAR(255) NOT NULL,
            apellido VARCHAR(255) NOT NULL,
            whatsapp VARCHAR(50) NOT NULL,
            email VARCHAR(255) NOT NULL,
            fecha_viaje VARCHAR(255) NOT NULL DEFAULT '',
            tratamiento_datos BOOLEAN DEFAULT false,
            created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
        )
        "#,
    ),
    (
        // Tables created before the travel date was stored lack this column
        "add_registros_fecha_viaje",
        "ALTER TABLE registros ADD COLUMN IF NOT EXISTS fecha_viaje VARCHAR(255) NOT NULL DEFAULT ''",
    ),
    (
        "idx_registros_email",
        "CREATE INDEX IF NOT EXISTS idx_registros_email ON registros(email)",
    ),
    (
        "idx_registros_created_at",
        "CREATE INDEX IF NOT EXISTS idx_registros_created_at ON registros(created_at DESC)",
    ),
    (
        "create_page_views",
        r#"
        CREATE TABLE IF NOT EXISTS page_views (
            id SERIAL PRIMARY KEY,
            ip_address VARCHAR(50) NOT NULL,
            user_agent TEXT,
            visited_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
        )
        "#,
    ),
    (
        "idx_page_views_ip",
        "CREATE INDEX IF NOT EXISTS idx_page_views_ip ON page_views(ip_address)",
    ),
    (
        "idx_page_views_visited_at",
        "CREATE INDEX IF NOT EXISTS idx_page_views_visited_at ON page_views(visited_at DESC)",
    ),
];

/// Runs all provisioning statements against the pool.
pub async fn provision(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (name, statement) in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
        info!(step = name, "Schema step applied");
    }
    Ok(())
}

/// PostgreSQL-backed [`SchemaProvisioner`].
#[derive(Clone)]
pub struct PgSchemaProvisioner {
    pool: PgPool,
}

impl PgSchemaProvisioner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaProvisioner for PgSchemaProvisioner {
    async fn provision(&self) -> Result<(), StoreError> {
        provision(&self.pool).await.map_err(to_store_error)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(to_store_error)
    }
}
