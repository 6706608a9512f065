//! Public configuration endpoint.
//!
//! Exposes the links the landing page renders, so they live in one place.

use axum::{extract::State, Json};
use serde::Serialize;
use shared::links::whatsapp_link;

use crate::app::AppState;
use crate::config::CheckoutConfig;

const PAYMENT_DONE_TEXT: &str = "Hola! Acabo de realizar mi pago para Minca Mágica";
const HELP_TEXT: &str = "Hola! Necesito ayuda con mi reserva de Minca Mágica";
const CANCELLATION_TEXT: &str = "Hola! Necesito cancelar mi reserva de Minca Mágica";

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PublicConfigResponse {
    /// Same-origin path that redirects to the payment page
    pub checkout_path: &'static str,
    pub checkout_url: String,
    /// Absent when no contact number is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactLinks>,
}

/// Prefilled WhatsApp chat links.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContactLinks {
    pub payment_confirmation: String,
    pub help: String,
    pub cancellation: String,
}

fn build_public_config(checkout: &CheckoutConfig) -> PublicConfigResponse {
    let phone = checkout.contact_whatsapp.trim();
    let contact = (!phone.is_empty()).then(|| ContactLinks {
        payment_confirmation: whatsapp_link(phone, Some(PAYMENT_DONE_TEXT)),
        help: whatsapp_link(phone, Some(HELP_TEXT)),
        cancellation: whatsapp_link(phone, Some(CANCELLATION_TEXT)),
    });

    PublicConfigResponse {
        checkout_path: "/api/checkout",
        checkout_url: checkout.payment_url.clone(),
        contact,
    }
}

/// GET /api/config/public
pub async fn get_public_config(State(state): State<AppState>) -> Json<PublicConfigResponse> {
    Json(build_public_config(&state.config.checkout))
}
