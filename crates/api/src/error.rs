use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::ports::StoreError;
use domain::services::RegistrationError;
use serde::Serialize;
use thiserror::Error;

/// Message shown to a client that exceeded the registration limit.
pub const RATE_LIMITED_MESSAGE: &str =
    "Has excedido el límite de registros. Intenta de nuevo en 10 minutos.";

/// Generic message for failures whose details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error al procesar el registro";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable machine-readable kind, sent as `code`.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "invalid_input",
            ApiError::RateLimited { .. } => "rate_limited",
            ApiError::Internal(_) => "internal_error",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, retry_after) = match self {
            ApiError::Validation(msg) => (msg, None),
            ApiError::RateLimited { retry_after_secs } => {
                (RATE_LIMITED_MESSAGE.to_string(), Some(retry_after_secs))
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (INTERNAL_ERROR_MESSAGE.to_string(), None)
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (INTERNAL_ERROR_MESSAGE.to_string(), None)
            }
        };

        let body = ErrorBody {
            success: false,
            error: message,
            code,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ApiError::ServiceUnavailable(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::RateLimited { retry_after_secs } => {
                ApiError::RateLimited { retry_after_secs }
            }
            RegistrationError::InvalidInput(msg) => ApiError::Validation(msg),
            // Clients see a 500 for every persistence failure, whatever its kind
            RegistrationError::PersistenceFailure(store_err) => {
                ApiError::Internal(store_err.to_string())
            }
        }
    }
}
