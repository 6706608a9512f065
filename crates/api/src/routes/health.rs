//! Health check endpoint handlers.

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
    pub email_enabled: bool,
}

/// Database health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Full health check endpoint.
///
/// 200 with details when the store answers, 503 with the same body otherwise.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let connected = state.schema.ping().await.is_ok();
    let latency_ms = start.elapsed().as_millis() as u64;

    let response = HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            connected,
            latency_ms: connected.then_some(latency_ms),
        },
        email_enabled: state.config.email.enabled,
    };

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// Liveness probe endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse { status: "alive" })
}

/// Readiness probe endpoint.
///
/// Returns 200 OK if the service can accept traffic (store reachable).
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    match state.schema.ping().await {
        Ok(()) => Ok(Json(StatusResponse { status: "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "0.3.0",
            database: DatabaseHealth {
                connected: true,
                latency_ms: Some(5),
            },
            email_enabled: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["database"]["latency_ms"], 5);
        assert_eq!(json["email_enabled"], false);
    }

    #[test]
    fn test_disconnected_database_omits_latency() {
        let health = DatabaseHealth {
            connected: false,
            latency_ms: None,
        };
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["connected"], false);
        assert!(json.get("latency_ms").is_none());
    }
}
