// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client for the `/api` routes, as the pages call them.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    chain::AccountBalances,
    models::{AccountDetails, PublicAccount, StakeResponse},
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Request(String),

    /// Non-2xx answer. `body` is the decoded JSON, or `Null`.
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: Value },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// `error` text from a failed route's body.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            ClientError::Status { body, .. } => body.get("error").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// The routes the pages depend on.
#[async_trait]
pub trait GiftApi: Send + Sync {
    /// USD price of one token (`GET /api/price/{symbol}`).
    async fn token_price(&self, symbol: &str) -> Result<f64, ClientError>;

    /// Client secret of a new payment intent for `amount_cents`.
    async fn create_payment_intent(&self, amount_cents: u64) -> Result<Option<String>, ClientError>;

    async fn execute_transfer(&self, amount_strk: f64) -> Result<Value, ClientError>;

    async fn account_details(&self) -> Result<AccountDetails, ClientError>;

    /// Address and `funding_tx_hash`, without key material.
    async fn backend_account(&self) -> Result<PublicAccount, ClientError>;

    async fn send_gift(&self, address: &str, amount_strk: f64) -> Result<Value, ClientError>;

    /// `amount` is sent as typed; the route coerces it.
    async fn stake(&self, amount: &str, address: Option<&str>) -> Result<StakeResponse, ClientError>;

    async fn create_deploy(&self) -> Result<Value, ClientError>;

    async fn balances(&self, address: &str) -> Result<AccountBalances, ClientError>;
}

/// [`GiftApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGiftApi {
    base_url: String,
    http: Client,
}

impl HttpGiftApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::Request(format!("GET {path} failed: {e}")))?;
        decode(path, response).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, ClientError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Request(format!("POST {path} failed: {e}")))?;
        decode(path, response).await
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("{path}: {e}")))
}

#[async_trait]
impl GiftApi for HttpGiftApi {
    async fn token_price(&self, symbol: &str) -> Result<f64, ClientError> {
        let body: Value = self.get(&format!("/api/price/{symbol}")).await?;
        // One entry keyed by the quote source's id.
        body.as_object()
            .and_then(|quotes| quotes.values().next())
            .and_then(|quote| quote.get("usd"))
            .and_then(Value::as_f64)
            .ok_or_else(|| ClientError::InvalidResponse(format!("no usd price for {symbol}")))
    }

    async fn create_payment_intent(&self, amount_cents: u64) -> Result<Option<String>, ClientError> {
        let body: Value = self
            .post("/api/create-payment-intent", &json!({ "amount": amount_cents }))
            .await?;
        Ok(body
            .get("clientSecret")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn execute_transfer(&self, amount_strk: f64) -> Result<Value, ClientError> {
        self.post("/api/execute-transfer", &json!({ "amount_strk": amount_strk }))
            .await
    }

    async fn account_details(&self) -> Result<AccountDetails, ClientError> {
        self.get("/api/get-account-details").await
    }

    async fn backend_account(&self) -> Result<PublicAccount, ClientError> {
        self.get("/api/account").await
    }

    async fn send_gift(&self, address: &str, amount_strk: f64) -> Result<Value, ClientError> {
        self.post(
            "/api/send-gift",
            &json!({ "address": address, "amount_strk": amount_strk }),
        )
        .await
    }

    async fn stake(&self, amount: &str, address: Option<&str>) -> Result<StakeResponse, ClientError> {
        self.post("/api/stake", &json!({ "amount": amount, "address": address }))
            .await
    }

    async fn create_deploy(&self) -> Result<Value, ClientError> {
        self.post("/api/create-deploy", &json!({})).await
    }

    async fn balances(&self, address: &str) -> Result<AccountBalances, ClientError> {
        self.get(&format!("/api/balance/{address}")).await
    }
}
