// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::{
    error::{ApiError, JsonBody},
    models::{coerce_amount, BackendStake, StakeRequest, StakeResponse},
    state::AppState,
};

/// Stake STRK through the backend.
///
/// `amount` may be a number or a numeric string. Anything else is forwarded
/// as `null` and left for the backend to reject.
#[utoipa::path(
    post,
    path = "/api/stake",
    request_body = StakeRequest,
    tag = "Staking",
    responses(
        (status = 200, body = StakeResponse),
        (status = 400, description = "Staking failed")
    )
)]
pub async fn stake(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<StakeRequest>,
) -> Result<Json<StakeResponse>, ApiError> {
    let stake = BackendStake {
        amount_strk: coerce_amount(&request.amount),
    };

    let reply = state.backend.stake(&stake).await.map_err(|e| {
        warn!(error = %e, "Staking error");
        ApiError::bad_request("Staking failed")
    })?;

    if !reply.is_success() {
        let message = reply.detail().unwrap_or("Staking failed").to_string();
        warn!(status = %reply.status, %message, "Backend refused stake");
        return Err(ApiError::bad_request(message));
    }

    info!(amount_strk = ?stake.amount_strk, "Stake submitted");
    Ok(Json(StakeResponse {
        success: true,
        output: reply.body.get("message").cloned(),
        tx_hash: reply.body.get("transaction_hash").cloned(),
        error: None,
    }))
}
