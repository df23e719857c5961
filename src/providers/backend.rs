// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client for the StarkGift backend.
//!
//! The backend owns every on-chain operation: account creation and
//! deployment, STRK transfers, gifts and staking. It answers JSON; errors
//! come back either as `{"status": "error", "message": ..}` or as
//! `{"detail": ..}` with a non-2xx status.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::AppConfig,
    models::{BackendStake, BackendTransfer},
};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(String),

    #[error("backend response was invalid: {0}")]
    InvalidResponse(String),
}

/// A parsed backend answer, successful or not.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: StatusCode,
    pub body: Value,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `{"status": "success"}` in the body, regardless of HTTP status.
    pub fn reports_success(&self) -> bool {
        self.body.get("status").and_then(Value::as_str) == Some("success")
    }

    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    pub fn detail(&self) -> Option<&str> {
        self.body.get("detail").and_then(Value::as_str)
    }

    /// `message`, else `detail`.
    pub fn error_text(&self) -> Option<&str> {
        self.message().or_else(|| self.detail())
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: Client,
}

impl BackendClient {
    /// No timeout is set: account deployment and transfers wait for chain
    /// inclusion and can take minutes.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.backend_url)
    }

    pub async fn execute_transfer(
        &self,
        transfer: &BackendTransfer,
    ) -> Result<BackendReply, BackendError> {
        self.post_json("/execute-transfer", Some(transfer)).await
    }

    pub async fn send_gift(&self, address: &Value, amount_strk: &Value) -> Result<BackendReply, BackendError> {
        let payload = serde_json::json!({
            "address": address,
            "amount_strk": amount_strk,
        });
        self.post_json("/send-gift", Some(&payload)).await
    }

    pub async fn stake(&self, stake: &BackendStake) -> Result<BackendReply, BackendError> {
        self.post_json("/stake", Some(stake)).await
    }

    /// Create, fund and deploy a fresh account. The backend rewrites the
    /// account file as a side effect.
    pub async fn create_deploy(&self) -> Result<BackendReply, BackendError> {
        self.post_json::<Value>("/create-deploy", None).await
    }

    pub async fn get_account(&self) -> Result<BackendReply, BackendError> {
        let path = "/get-account";
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("GET {path} failed: {e}")))?;
        read_reply(path, response).await
    }

    async fn post_json<T: Serialize>(
        &self,
        path: &str,
        payload: Option<&T>,
    ) -> Result<BackendReply, BackendError> {
        let mut request = self
            .http
            .post(self.url(path))
            .header("Content-Type", "application/json");
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("POST {path} failed: {e}")))?;
        read_reply(path, response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

async fn read_reply(path: &str, response: reqwest::Response) -> Result<BackendReply, BackendError> {
    let status = response.status();
    let body = response
        .json::<Value>()
        .await
        .map_err(|e| BackendError::InvalidResponse(format!("{path} returned {status} with invalid JSON: {e}")))?;
    Ok(BackendReply { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::{http::StatusCode as AxumStatus, routing::{get, post}, Json, Router};
    use serde_json::json;

    #[test]
    fn reply_accessors_read_common_fields() {
        let reply = BackendReply {
            status: StatusCode::OK,
            body: json!({"status": "success", "message": "done"}),
        };
        assert!(reply.is_success());
        assert!(reply.reports_success());
        assert_eq!(reply.error_text(), Some("done"));

        let failed = BackendReply {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({"detail": "insufficient balance"}),
        };
        assert!(!failed.is_success());
        assert!(!failed.reports_success());
        assert_eq!(failed.error_text(), Some("insufficient balance"));
    }

    #[tokio::test]
    async fn transfer_posts_address_and_amount() {
        let app = Router::new().route(
            "/execute-transfer",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"status": "success", "echo": body}))
            }),
        );
        let client = BackendClient::new(spawn_upstream(app).await);

        let reply = client
            .execute_transfer(&BackendTransfer {
                address: "0x0abc".into(),
                amount_strk: json!(25.4),
            })
            .await
            .unwrap();

        assert!(reply.reports_success());
        assert_eq!(reply.body["echo"], json!({"address": "0x0abc", "amount_strk": 25.4}));
    }

    #[tokio::test]
    async fn error_status_is_returned_not_raised() {
        let app = Router::new().route(
            "/send-gift",
            post(|| async {
                (
                    AxumStatus::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "insufficient balance"})),
                )
            }),
        );
        let client = BackendClient::new(spawn_upstream(app).await);

        let reply = client.send_gift(&json!("0x1"), &json!(1.0)).await.unwrap();
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.detail(), Some("insufficient balance"));
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_response() {
        let app = Router::new().route("/get-account", get(|| async { "plain text" }));
        let client = BackendClient::new(spawn_upstream(app).await);

        let err = client.get_account().await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_request_error() {
        let client = BackendClient::new("http://127.0.0.1:9");
        let err = client.create_deploy().await.unwrap_err();
        assert!(matches!(err, BackendError::Request(_)));
    }
}
