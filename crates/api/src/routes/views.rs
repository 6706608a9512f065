//! Page view analytics endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use domain::models::VisitStats;
use serde::Serialize;
use tracing::error;

use crate::app::AppState;
use crate::extractors::{UserAgent, VisitorAddr};
use crate::middleware::metrics::record_page_view;

#[derive(Debug, Serialize)]
pub struct RecordViewResponse {
    pub success: bool,
    pub views: i64,
    pub visitors: i64,
}

#[derive(Debug, Serialize)]
pub struct ViewErrorResponse {
    pub error: &'static str,
}

/// GET /api/views
///
/// Never fails: a store error is logged and reported as zero counters.
pub async fn get_views(State(state): State<AppState>) -> Json<VisitStats> {
    match state.analytics.get_stats().await {
        Ok(stats) => Json(stats),
        Err(e) => {
            error!(error = %e, "Failed to read page view stats");
            Json(VisitStats::default())
        }
    }
}

/// POST /api/views
pub async fn record_view(
    State(state): State<AppState>,
    VisitorAddr(addr): VisitorAddr,
    UserAgent(user_agent): UserAgent,
) -> impl IntoResponse {
    match state
        .analytics
        .record_and_get_stats(&addr, &user_agent, Utc::now())
        .await
    {
        Ok(stats) => {
            record_page_view();
            (
                StatusCode::OK,
                Json(RecordViewResponse {
                    success: true,
                    views: stats.views,
                    visitors: stats.visitors,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, client_addr = %addr, "Failed to record page view");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ViewErrorResponse {
                    error: "Error al registrar visita",
                }),
            )
                .into_response()
        }
    }
}
