// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! STRK delivery after a card payment, and free-form gifts.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, JsonBody},
    models::{
        transfer_amount_present, BackendTransfer, ExecuteTransferRequest,
        ExecuteTransferResponse, SendGiftRequest,
    },
    state::AppState,
};

/// Send purchased STRK to the stored account.
#[utoipa::path(
    post,
    path = "/api/execute-transfer",
    request_body = ExecuteTransferRequest,
    tag = "Transfers",
    responses(
        (status = 200, body = ExecuteTransferResponse),
        (status = 400, description = "Missing amount or transfer refused by the backend"),
        (status = 500, description = "Account file unreadable or backend unreachable")
    )
)]
pub async fn execute_transfer(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ExecuteTransferRequest>,
) -> Result<Json<ExecuteTransferResponse>, ApiError> {
    if !transfer_amount_present(request.amount_strk.as_ref()) {
        return Err(ApiError::bad_request("Missing required parameters").as_message());
    }
    let amount_strk = request.amount_strk.unwrap_or(Value::Null);

    let account = state.accounts.get_account().map_err(|e| {
        error!(error = %e, "Transfer error: account unavailable");
        ApiError::internal("Transfer failed")
            .as_message()
            .with_detail(e.to_string())
    })?;

    let reply = state
        .backend
        .execute_transfer(&BackendTransfer {
            address: account.address,
            amount_strk,
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Transfer error");
            ApiError::internal("Transfer failed")
                .as_message()
                .with_detail(e.to_string())
        })?;

    info!(status = %reply.status, "Backend transfer response");

    if reply.reports_success() {
        Ok(Json(ExecuteTransferResponse {
            message: "Transfer successful".to_string(),
            data: reply.body,
        }))
    } else {
        let message = reply.error_text().unwrap_or("Transfer failed").to_string();
        warn!(%message, "Backend refused transfer");
        Err(ApiError::bad_request(message).as_message())
    }
}

/// Forward a gift to the backend. The body is passed through unvalidated.
#[utoipa::path(
    post,
    path = "/api/send-gift",
    request_body = SendGiftRequest,
    tag = "Transfers",
    responses(
        (status = 200, description = "Backend response, verbatim"),
        (status = 500, description = "Gift failed")
    )
)]
pub async fn send_gift(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SendGiftRequest>,
) -> Result<Json<Value>, ApiError> {
    let reply = state
        .backend
        .send_gift(&request.address, &request.amount_strk)
        .await
        .map_err(|e| {
            error!(error = %e, "Gift error");
            ApiError::internal("Failed to send gift")
        })?;

    info!(status = %reply.status, "Gift response");

    if !reply.is_success() {
        let message = reply.detail().unwrap_or("Gift failed").to_string();
        warn!(%message, "Backend refused gift");
        return Err(ApiError::internal(message));
    }

    Ok(Json(reply.body))
}
