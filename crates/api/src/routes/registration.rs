//! Registration intake endpoint.

use std::collections::HashSet;
use std::convert::Infallible;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use chrono::Utc;
use domain::models::{RegistrationInput, RegistrationOutcome};
use domain::services::RegistrationError;
use serde::Serialize;
use tracing::warn;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ClientId;
use crate::middleware::metrics::record_registration;

/// Checkbox value browsers submit for a ticked consent box.
const CONSENT_CHECKED: &str = "on";

/// Intake form as posted by the landing page.
///
/// Accepts `multipart/form-data` (browser `FormData`) and
/// `application/x-www-form-urlencoded`. Absent fields are empty strings and
/// unknown fields are ignored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RegistrationForm {
    pub nombre: String,
    pub apellido: String,
    pub whatsapp: String,
    pub email: String,
    pub fecha_viaje: String,
    pub tratamiento_datos: Option<String>,
}

impl RegistrationForm {
    fn set_field(&mut self, name: &str, value: String) {
        match name {
            "nombre" => self.nombre = value,
            "apellido" => self.apellido = value,
            "whatsapp" => self.whatsapp = value,
            "email" => self.email = value,
            "fecha_viaje" => self.fecha_viaje = value,
            "tratamiento_datos" => self.tratamiento_datos = Some(value),
            _ => {}
        }
    }

    /// Builds the form from submitted pairs. A repeated field keeps its first value.
    fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut form = Self::default();
        let mut seen = HashSet::new();
        for (name, value) in pairs {
            if seen.insert(name.clone()) {
                form.set_field(&name, value);
            }
        }
        form
    }

    async fn from_multipart(mut multipart: Multipart) -> Self {
        let mut pairs = Vec::new();
        loop {
            match multipart.next_field().await {
                Ok(Some(field)) => {
                    let Some(name) = field.name().map(str::to_string) else {
                        continue;
                    };
                    match field.text().await {
                        Ok(value) => pairs.push((name, value)),
                        Err(e) => warn!(field = %name, error = %e, "Unreadable form field"),
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Malformed multipart body");
                    break;
                }
            }
        }
        Self::from_pairs(pairs)
    }
}

/// A body that cannot be parsed yields an empty form, so the request still
/// goes through the rate check and fails as missing fields.
#[axum::async_trait]
impl<S> FromRequest<S> for RegistrationForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            return Ok(match Multipart::from_request(req, state).await {
                Ok(multipart) => Self::from_multipart(multipart).await,
                Err(e) => {
                    warn!(error = %e, "Rejected multipart body");
                    Self::default()
                }
            });
        }

        Ok(match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => Self::from_pairs(pairs),
            Err(e) => {
                warn!(error = %e, "Rejected form body");
                Self::default()
            }
        })
    }
}

impl From<RegistrationForm> for RegistrationInput {
    fn from(form: RegistrationForm) -> Self {
        Self {
            consent: form.tratamiento_datos.as_deref() == Some(CONSENT_CHECKED),
            name: form.nombre,
            last_name: form.apellido,
            phone: form.whatsapp,
            email: form.email,
            travel_date: form.fecha_viaje,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: i32,
    pub email_sent: bool,
}

impl From<RegistrationOutcome> for RegistrationResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        Self {
            success: true,
            message: "Registro exitoso",
            id: outcome.id,
            email_sent: outcome.email_sent,
        }
    }
}

fn outcome_label(result: &Result<RegistrationOutcome, RegistrationError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(RegistrationError::RateLimited { .. }) => "rate_limited",
        Err(RegistrationError::InvalidInput(_)) => "invalid_input",
        Err(RegistrationError::PersistenceFailure(_)) => "error",
    }
}

/// POST /api/registro
pub async fn register(
    State(state): State<AppState>,
    ClientId(client_id): ClientId,
    form: RegistrationForm,
) -> Result<Json<RegistrationResponse>, ApiError> {
    let result = state
        .registration
        .register(form.into(), &client_id, Utc::now())
        .await;
    record_registration(outcome_label(&result));

    Ok(Json(result?.into()))
}
