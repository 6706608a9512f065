//! Schema setup endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::{error, info};

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SetupErrorResponse {
    pub error: &'static str,
    pub details: String,
}

/// GET /api/setup-db
///
/// Safe to call repeatedly; every statement is create-if-absent.
pub async fn setup_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.schema.provision().await {
        Ok(()) => {
            info!("Schema provisioned through setup endpoint");
            (
                StatusCode::OK,
                Json(SetupResponse {
                    success: true,
                    message: "Base de datos configurada correctamente (registros + page_views)",
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Schema provisioning failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SetupErrorResponse {
                    error: "Error al configurar la base de datos",
                    details: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
