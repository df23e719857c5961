// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Helpers shared by the unit tests.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::{
    config::AppConfig,
    models::AccountRecord,
    state::AppState,
    storage::{AccountStore, InMemoryAccountStore},
};

/// Nothing listens on the discard port.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

pub const TEST_ADDRESS: &str =
    "0x0530f347bb9aad521c36d803f44957242dbf67cb52078609e3c3cfb5a82e9544";

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Config whose upstreams all point at [`UNREACHABLE_URL`].
pub fn offline_config() -> AppConfig {
    let mut config = AppConfig::new("sk_test_123");
    config.backend_url = UNREACHABLE_URL.into();
    config.stripe_api_base_url = UNREACHABLE_URL.into();
    config.price_api_url = UNREACHABLE_URL.into();
    config
}

pub fn test_account() -> AccountRecord {
    AccountRecord {
        address: TEST_ADDRESS.into(),
        private_key: "0x0123secret".into(),
        public_key: Some("0x0456".into()),
        funding_tx_hash: None,
    }
}

pub fn state_with(config: AppConfig, accounts: impl AccountStore + 'static) -> AppState {
    AppState::with_store(config, Arc::new(accounts)).unwrap()
}

/// State with the offline config and a stored test account.
pub fn offline_state() -> AppState {
    state_with(
        offline_config(),
        InMemoryAccountStore::with_account(test_account()),
    )
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Drive `app` with one request and decode the JSON answer.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
