// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::{
    error::{ApiError, JsonBody},
    models::{CreatePaymentIntentRequest, CreatePaymentIntentResponse, PaymentConfigResponse},
    state::AppState,
};

/// Create a payment intent and hand its client secret to the browser.
///
/// Every call creates a new, chargeable intent.
#[utoipa::path(
    post,
    path = "/api/create-payment-intent",
    request_body = CreatePaymentIntentRequest,
    tag = "Payments",
    responses(
        (status = 200, body = CreatePaymentIntentResponse),
        (status = 400, description = "Rejected by the payment processor")
    )
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let intent = state
        .payments
        .create_payment_intent(request.amount.as_ref())
        .await
        .map_err(|e| {
            warn!(error = %e, "Error creating payment intent");
            ApiError::bad_request(e.to_string())
        })?;

    info!(payment_intent = %intent.id, "Payment intent ready");
    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

#[utoipa::path(
    get,
    path = "/api/payment-config",
    tag = "Payments",
    responses((status = 200, body = PaymentConfigResponse))
)]
pub async fn payment_config(State(state): State<AppState>) -> Json<PaymentConfigResponse> {
    Json(PaymentConfigResponse {
        publishable_key: state.config.stripe_publishable_key.clone(),
    })
}
