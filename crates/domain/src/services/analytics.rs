//! Page view counters.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{NewPageView, VisitStats};
use crate::ports::{PageViewStore, StoreError};

/// Records visits and reads aggregate counters. Independent of registration.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn PageViewStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn PageViewStore>) -> Self {
        Self { store }
    }

    /// Appends one view. No deduplication and no rate limiting.
    pub async fn record_view(
        &self,
        client_addr: &str,
        user_agent: &str,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let view = NewPageView {
            client_addr: client_addr.to_string(),
            user_agent: user_agent.to_string(),
            visited_at: now,
        };
        self.store.insert_view(&view).await
    }

    pub async fn get_stats(&self) -> Result<VisitStats, StoreError> {
        let (views, visitors) = tokio::try_join!(
            self.store.count_views(),
            self.store.count_distinct_visitors()
        )?;
        Ok(VisitStats { views, visitors })
    }

    /// Records a view, then returns the refreshed counters.
    pub async fn record_and_get_stats(
        &self,
        client_addr: &str,
        user_agent: &str,
        now: DateTime<Utc>,
    ) -> Result<VisitStats, StoreError> {
        self.record_view(client_addr, user_agent, now).await?;
        self.get_stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryViews {
        rows: Mutex<Vec<NewPageView>>,
        fail_reads: bool,
    }

    #[async_trait]
    impl PageViewStore for MemoryViews {
        async fn insert_view(&self, view: &NewPageView) -> Result<(), StoreError> {
            self.rows.lock().unwrap().push(view.clone());
            Ok(())
        }

        async fn count_views(&self) -> Result<i64, StoreError> {
            if self.fail_reads {
                return Err(StoreError::Unavailable("down".to_string()));
            }
            Ok(self.rows.lock().unwrap().len() as i64)
        }

        async fn count_distinct_visitors(&self) -> Result<i64, StoreError> {
            let rows = self.rows.lock().unwrap();
            let distinct: HashSet<_> = rows.iter().map(|v| v.client_addr.as_str()).collect();
            Ok(distinct.len() as i64)
        }
    }

    #[tokio::test]
    async fn test_record_and_count() {
        let service = AnalyticsService::new(Arc::new(MemoryViews::default()));
        let now = Utc::now();

        service.record_view("1.1.1.1", "curl", now).await.unwrap();
        service.record_view("1.1.1.1", "curl", now).await.unwrap();
        let stats = service
            .record_and_get_stats("2.2.2.2", "firefox", now)
            .await
            .unwrap();

        assert_eq!(stats, VisitStats { views: 3, visitors: 2 });
    }

    #[tokio::test]
    async fn test_empty_stats() {
        let service = AnalyticsService::new(Arc::new(MemoryViews::default()));
        assert_eq!(service.get_stats().await.unwrap(), VisitStats::default());
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let store = MemoryViews {
            fail_reads: true,
            ..MemoryViews::default()
        };
        let service = AnalyticsService::new(Arc::new(store));
        assert!(service.get_stats().await.is_err());
    }
}
