//! Page view domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded visit to the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub id: i32,
    pub client_addr: String,
    pub user_agent: Option<String>,
    pub visited_at: DateTime<Utc>,
}

/// A visit to be appended to the views table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPageView {
    pub client_addr: String,
    pub user_agent: String,
    pub visited_at: DateTime<Utc>,
}

/// Aggregate visit counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisitStats {
    /// Total recorded views.
    pub views: i64,
    /// Distinct client addresses.
    pub visitors: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_stats_default_is_zero() {
        let stats = VisitStats::default();
        assert_eq!(stats.views, 0);
        assert_eq!(stats.visitors, 0);
    }

    #[test]
    fn test_visit_stats_serialization() {
        let json = serde_json::to_string(&VisitStats {
            views: 12,
            visitors: 5,
        })
        .unwrap();
        assert_eq!(json, r#"{"views":12,"visitors":5}"#);
    }
}
