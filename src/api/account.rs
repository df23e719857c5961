// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account creation and lookup.
//!
//! `GET /api/get-account-details` returns the stored private key to any
//! caller. There is no authentication in front of it. It is the only route
//! that does: `GET /api/account` strips the backend's key fields.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    error::ApiError,
    models::{AccountDetails, PublicAccount},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/get-account-details",
    tag = "Account",
    responses(
        (status = 200, body = AccountDetails),
        (status = 500, description = "Account file missing or malformed")
    )
)]
pub async fn get_account_details(
    State(state): State<AppState>,
) -> Result<Json<AccountDetails>, ApiError> {
    let record = state.accounts.get_account().map_err(|e| {
        error!(error = %e, "Error reading account data");
        ApiError::internal("Failed to get account details")
    })?;

    Ok(Json(AccountDetails::from(record)))
}

/// Create, fund and deploy a new account through the backend.
#[utoipa::path(
    post,
    path = "/api/create-deploy",
    tag = "Account",
    responses(
        (status = 200, description = "Backend response, verbatim"),
        (status = 502, description = "Backend unreachable")
    )
)]
pub async fn create_deploy(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let reply = state.backend.create_deploy().await.map_err(|e| {
        error!(error = %e, "Account creation error");
        ApiError::bad_gateway(e.to_string())
    })?;

    if !reply.is_success() {
        let message = reply.detail().unwrap_or("Account creation failed").to_string();
        warn!(status = %reply.status, %message, "Backend refused account creation");
        let status =
            StatusCode::from_u16(reply.status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(ApiError::new(status, message));
    }

    info!("Account created and deployed");
    Ok(Json(reply.body))
}

/// Backend's view of the current account: address and funding
/// transaction only.
#[utoipa::path(
    get,
    path = "/api/account",
    tag = "Account",
    responses(
        (status = 200, body = PublicAccount),
        (status = 502, description = "Backend unreachable, failing or without an address")
    )
)]
pub async fn backend_account(
    State(state): State<AppState>,
) -> Result<Json<PublicAccount>, ApiError> {
    let reply = state.backend.get_account().await.map_err(|e| {
        warn!(error = %e, "Account lookup failed");
        ApiError::bad_gateway(e.to_string())
    })?;

    if !reply.is_success() {
        let message = reply
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Backend returned {}", reply.status));
        return Err(ApiError::bad_gateway(message));
    }

    serde_json::from_value(reply.body).map(Json).map_err(|e| {
        warn!(error = %e, "Unexpected account data from backend");
        ApiError::bad_gateway(format!("Unexpected account data: {e}"))
    })
}
