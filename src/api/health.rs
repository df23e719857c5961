// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::storage::StorageError;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Account record: "ok", "missing" or "unreadable".
    pub account: String,
    /// Starknet RPC, only present when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starknet_rpc: Option<String>,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

fn check_account(state: &AppState) -> String {
    match state.accounts.get_account() {
        Ok(_) => "ok",
        Err(StorageError::NotFound(_)) => "missing",
        Err(_) => "unreadable",
    }
    .to_string()
}

async fn check_rpc(state: &AppState) -> Option<String> {
    let reader = state.chain.as_ref()?;
    Some(
        match reader.block_number().await {
            Ok(_) => "ok",
            Err(_) => "unavailable",
        }
        .to_string(),
    )
}

/// Health check endpoint handler.
///
/// Returns 200 if all checks pass, 503 if any check fails.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ReadyResponse),
        (status = 503, description = "Service is unhealthy", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let account = check_account(&state);
    let starknet_rpc = check_rpc(&state).await;

    let rpc_ok = starknet_rpc.as_ref().map(|s| s == "ok").unwrap_or(true);
    let all_ok = account == "ok" && rpc_ok;

    let response = ReadyResponse {
        status: if all_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            account,
            starknet_rpc,
        },
    };

    let status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe handler. Transfers need the account record, so a
/// missing one means not ready.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Service is not ready", body = ReadyResponse)
    )
)]
pub async fn readiness(state: State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    health(state).await
}

#[cfg(test)]
mod tests {
    use crate::api::router;
    use crate::storage::InMemoryAccountStore;
    use crate::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn liveness_is_always_ok() {
        let (status, body) = send(router(offline_state()), get_request("/health/live")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn ready_with_stored_account() {
        let (status, body) = send(router(offline_state()), get_request("/health/ready")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["account"], "ok");
        assert!(body["checks"].get("starknet_rpc").is_none());
    }

    #[tokio::test]
    async fn missing_account_is_degraded() {
        let app = router(state_with(offline_config(), InMemoryAccountStore::new()));
        let (status, body) = send(app, get_request("/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["account"], "missing");
    }

    #[tokio::test]
    async fn unreachable_rpc_is_degraded() {
        let mut config = offline_config();
        config.starknet_rpc_url = Some(UNREACHABLE_URL.into());
        let app = router(state_with(
            config,
            InMemoryAccountStore::with_account(test_account()),
        ));

        let (status, body) = send(app, get_request("/health/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["checks"]["starknet_rpc"], "unavailable");
    }
}
