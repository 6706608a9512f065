//! Page view entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the page_views table.
#[derive(Debug, Clone, FromRow)]
pub struct PageViewEntity {
    pub id: i32,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
}

impl From<PageViewEntity> for domain::models::PageView {
    fn from(entity: PageViewEntity) -> Self {
        Self {
            id: entity.id,
            client_addr: entity.ip_address,
            user_agent: entity.user_agent,
            visited_at: entity.visited_at.unwrap_or_else(Utc::now),
        }
    }
}
