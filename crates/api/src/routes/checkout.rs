//! Hand-off to the external payment page.

use axum::{extract::State, response::Redirect};

use crate::app::AppState;

/// GET /api/checkout
///
/// 303 See Other to the configured payment link.
pub async fn checkout(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.config.checkout.payment_url)
}
