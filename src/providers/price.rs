// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! USD price quotes from a CoinGecko-compatible `simple/price` endpoint.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("unsupported token symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("price request failed: {0}")]
    Request(String),

    #[error("price response was invalid: {0}")]
    InvalidResponse(String),
}

/// Quote-source id for a token symbol.
pub fn quote_id(symbol: &str) -> Option<&'static str> {
    match symbol.trim().to_ascii_uppercase().as_str() {
        "STRK" => Some("starknet"),
        "ETH" => Some("ethereum"),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct PriceClient {
    base_url: String,
    http: Client,
}

/// A resolved USD price for one token.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub id: &'static str,
    pub usd: f64,
}

impl PriceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, PriceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PriceError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PriceError> {
        Self::new(&config.price_api_url)
    }

    pub async fn usd_price(&self, symbol: &str) -> Result<PriceQuote, PriceError> {
        let id = quote_id(symbol).ok_or_else(|| PriceError::UnsupportedSymbol(symbol.to_string()))?;

        let response = self
            .http
            .get(format!("{}/simple/price", self.base_url.trim_end_matches('/')))
            .query(&[("ids", id), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| PriceError::Request(format!("GET simple/price failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(PriceError::Request(format!(
                "GET simple/price returned {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PriceError::InvalidResponse(format!("invalid JSON: {e}")))?;

        let usd = body
            .pointer(&format!("/{id}/usd"))
            .and_then(Value::as_f64)
            .ok_or_else(|| PriceError::InvalidResponse(format!("missing {id}.usd in response")))?;

        Ok(PriceQuote { id, usd })
    }
}
