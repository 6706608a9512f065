//! Page view repository for database operations.

use async_trait::async_trait;
use domain::models::NewPageView;
use domain::ports::{PageViewStore, StoreError};
use sqlx::PgPool;

use crate::db::to_store_error;
use crate::entities::PageViewEntity;
use crate::metrics::QueryTimer;

/// Repository for page view rows and their aggregates.
#[derive(Clone)]
pub struct PageViewRepository {
    pool: PgPool,
}

impl PageViewRepository {
    /// Creates a new PageViewRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one view.
    pub async fn insert(&self, view: &NewPageView) -> Result<PageViewEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_page_view");
        let result = sqlx::query_as::<_, PageViewEntity>(
            r#"
            INSERT INTO page_views (ip_address, user_agent, visited_at)
            VALUES ($1, $2, $3)
            RETURNING id, ip_address, user_agent, visited_at
            "#,
        )
        .bind(&view.client_addr)
        .bind(&view.user_agent)
        .bind(view.visited_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn count_all(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_page_views");
        let result = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM page_views")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result.map(|(count,)| count)
    }

    pub async fn count_distinct_addresses(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_distinct_visitors");
        let result =
            sqlx::query_as::<_, (i64,)>("SELECT COUNT(DISTINCT ip_address) FROM page_views")
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result.map(|(count,)| count)
    }
}

#[async_trait]
impl PageViewStore for PageViewRepository {
    async fn insert_view(&self, view: &NewPageView) -> Result<(), StoreError> {
        self.insert(view).await.map(|_| ()).map_err(to_store_error)
    }

    async fn count_views(&self) -> Result<i64, StoreError> {
        self.count_all().await.map_err(to_store_error)
    }

    async fn count_distinct_visitors(&self) -> Result<i64, StoreError> {
        self.count_distinct_addresses().await.map_err(to_store_error)
    }
}
