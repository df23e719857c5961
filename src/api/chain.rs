// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only chain lookups for the header and wallet views.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::warn;

use crate::{
    chain::{
        AccountBalances, ChainError, StakedAmount, StarknetReader, TransferHistory, STRK_TOKEN,
        TRANSFER_HISTORY_WINDOW,
    },
    error::ApiError,
    state::AppState,
};

fn reader(state: &AppState) -> Result<Arc<StarknetReader>, ApiError> {
    state
        .chain
        .clone()
        .ok_or_else(|| ApiError::service_unavailable("Starknet RPC is not configured"))
}

fn chain_error(e: ChainError) -> ApiError {
    match e {
        ChainError::InvalidAddress(_) => ApiError::bad_request(e.to_string()),
        other => {
            warn!(error = %other, "Chain query failed");
            ApiError::bad_gateway(other.to_string())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/balance/{address}",
    params(("address" = String, Path, description = "Starknet account address")),
    tag = "Chain",
    responses(
        (status = 200, body = AccountBalances),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "RPC not configured")
    )
)]
pub async fn balances(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AccountBalances>, ApiError> {
    let reader = reader(&state)?;
    reader
        .header_balances(&address)
        .await
        .map(Json)
        .map_err(chain_error)
}

/// STRK transfers in the recent block window, newest first.
#[utoipa::path(
    get,
    path = "/api/transfers/{address}",
    params(("address" = String, Path, description = "Starknet account address")),
    tag = "Chain",
    responses(
        (status = 200, body = TransferHistory),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "RPC not configured")
    )
)]
pub async fn transfers(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<TransferHistory>, ApiError> {
    let reader = reader(&state)?;
    let mut history = reader
        .transfer_history(&address, &STRK_TOKEN, TRANSFER_HISTORY_WINDOW)
        .await
        .map_err(chain_error)?;

    for event in &mut history.events {
        event.explorer_url = Some(state.config.explorer_tx_link(&event.transaction_hash));
    }
    Ok(Json(history))
}

#[utoipa::path(
    get,
    path = "/api/staked/{address}",
    params(("address" = String, Path, description = "Pool member address")),
    tag = "Chain",
    responses(
        (status = 200, body = StakedAmount),
        (status = 400, description = "Invalid address"),
        (status = 503, description = "RPC or staking pool not configured")
    )
)]
pub async fn staked(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<StakedAmount>, ApiError> {
    let reader = reader(&state)?;
    let pool = state
        .config
        .staking_pool_address
        .as_deref()
        .ok_or_else(|| ApiError::service_unavailable("Staking pool is not configured"))?;

    reader
        .pool_member_shares(pool, &address)
        .await
        .map(Json)
        .map_err(chain_error)
}
