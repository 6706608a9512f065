//! Database connection pool management.

use domain::ports::StoreError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

/// Maps a driver error onto the domain's store error taxonomy.
///
/// SQLSTATE class 23 (integrity constraint violation) becomes `Constraint`;
/// pool and transport failures become `Unavailable`.
pub fn to_store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let is_constraint = db_err
                .code()
                .map(|code| code.starts_with("23"))
                .unwrap_or(false);
            if is_constraint {
                StoreError::Constraint(db_err.to_string())
            } else {
                StoreError::Query(db_err.to_string())
            }
        }
        unavailable @ (sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)) => StoreError::Unavailable(unavailable.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(matches!(
            to_store_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            to_store_error(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            to_store_error(sqlx::Error::Io(io)),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_row_not_found_is_query_error() {
        assert!(matches!(
            to_store_error(sqlx::Error::RowNotFound),
            StoreError::Query(_)
        ));
    }
}
