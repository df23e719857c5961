// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stripe integration for card payments.
//!
//! Only payment-intent creation happens server-side. Collecting card
//! details and confirming the intent is done by Stripe's hosted widget in
//! the browser with the returned client secret.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;

pub const PAYMENT_CURRENCY: &str = "usd";

#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// Stripe rejected the request; `message` is Stripe's own text.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Stripe request failed: {0}")]
    Request(String),

    #[error("Stripe response was invalid: {0}")]
    InvalidResponse(String),
}

/// Payment intent fields the checkout needs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    /// Minor currency units.
    pub amount: u64,
    pub currency: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StripeClient {
    api_base_url: String,
    secret_key: String,
    api_version: String,
    http: Client,
}

impl StripeClient {
    pub fn new(
        api_base_url: impl Into<String>,
        secret_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self, StripeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| StripeError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url: api_base_url.into(),
            secret_key: secret_key.into(),
            api_version: api_version.into(),
            http,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, StripeError> {
        Self::new(
            &config.stripe_api_base_url,
            &config.stripe_secret_key,
            &config.stripe_api_version,
        )
    }

    /// Create a USD payment intent with automatic payment methods.
    ///
    /// `amount` is forwarded as-is; Stripe is the one validating it. A new
    /// idempotency key is used per call, so every call is a new intent.
    pub async fn create_payment_intent(
        &self,
        amount: Option<&Value>,
    ) -> Result<PaymentIntent, StripeError> {
        let mut form: Vec<(&str, String)> = Vec::with_capacity(3);
        if let Some(amount) = amount.and_then(form_value) {
            form.push(("amount", amount));
        }
        form.push(("currency", PAYMENT_CURRENCY.to_string()));
        form.push(("automatic_payment_methods[enabled]", "true".to_string()));

        let idempotency_key = Uuid::new_v4().to_string();
        let path = "/v1/payment_intents";

        let response = self
            .http
            .post(format!(
                "{}{}",
                self.api_base_url.trim_end_matches('/'),
                path
            ))
            .bearer_auth(&self.secret_key)
            .header("Stripe-Version", &self.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| StripeError::Request(format!("POST {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StripeError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body)
                    .unwrap_or_else(|| format!("POST {path} returned {status}")),
            });
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| StripeError::InvalidResponse(format!("POST {path} invalid JSON: {e}")))?;

        info!(
            payment_intent = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            "Stripe payment intent created"
        );

        Ok(intent)
    }
}

/// Render a JSON scalar the way Stripe's form encoding expects it.
fn form_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Stripe errors look like `{"error": {"message": "...", "type": "..."}}`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::{http::HeaderMap, routing::post, Form, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn form_value_renders_scalars() {
        assert_eq!(form_value(&json!(1000)), Some("1000".to_string()));
        assert_eq!(form_value(&json!("1000")), Some("1000".to_string()));
        assert_eq!(form_value(&json!(10.5)), Some("10.5".to_string()));
        assert_eq!(form_value(&json!(null)), None);
    }

    #[test]
    fn extracts_stripe_error_message() {
        let body = r#"{"error":{"message":"Amount must be at least 50 cents","type":"invalid_request_error"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Amount must be at least 50 cents")
        );
        assert_eq!(extract_error_message("<html>"), None);
    }

    #[tokio::test]
    async fn create_payment_intent_sends_form_and_parses_intent() {
        let app = Router::new().route(
            "/v1/payment_intents",
            post(
                |headers: HeaderMap, Form(form): Form<HashMap<String, String>>| async move {
                    assert_eq!(
                        headers.get("authorization").and_then(|v| v.to_str().ok()),
                        Some("Bearer sk_test_123")
                    );
                    assert_eq!(
                        headers.get("stripe-version").and_then(|v| v.to_str().ok()),
                        Some("2024-12-18.acacia")
                    );
                    assert!(headers.contains_key("idempotency-key"));
                    assert_eq!(form.get("currency").map(String::as_str), Some("usd"));
                    assert_eq!(
                        form.get("automatic_payment_methods[enabled]").map(String::as_str),
                        Some("true")
                    );
                    let amount: u64 = form["amount"].parse().unwrap();
                    Json(json!({
                        "id": "pi_123",
                        "client_secret": "pi_123_secret_abc",
                        "amount": amount,
                        "currency": "usd",
                        "status": "requires_payment_method"
                    }))
                },
            ),
        );
        let base = spawn_upstream(app).await;
        let client = StripeClient::new(base, "sk_test_123", "2024-12-18.acacia").unwrap();

        let intent = client
            .create_payment_intent(Some(&json!(1000)))
            .await
            .expect("intent created");
        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.amount, 1000);
        assert_eq!(intent.client_secret.as_deref(), Some("pi_123_secret_abc"));
    }

    #[tokio::test]
    async fn stripe_rejection_surfaces_its_message() {
        let app = Router::new().route(
            "/v1/payment_intents",
            post(|| async {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    Json(json!({"error": {"message": "Missing required param: amount."}})),
                )
            }),
        );
        let base = spawn_upstream(app).await;
        let client = StripeClient::new(base, "sk_test_123", "2024-12-18.acacia").unwrap();

        let err = client.create_payment_intent(None).await.unwrap_err();
        assert!(matches!(err, StripeError::Api { status: 400, .. }));
        assert_eq!(err.to_string(), "Missing required param: amount.");
    }
}
