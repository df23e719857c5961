// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the `/api` routes, plus the account
//! record the backend leaves on disk. Bodies derive `ToSchema` for the
//! OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Account**: the record written by the backend and its public view
//! - **Payments**: payment-intent creation
//! - **Transfers**: transfer, gift and stake proxies
//! - **Quotes**: token price passthrough

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// =============================================================================
// Account Models
// =============================================================================

/// The most recently created account, as written by the backend.
///
/// `funding_tx_hash` is whatever the backend last stored there: a hash
/// string after account creation, a transfer result object after a
/// purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub address: String,
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_tx_hash: Option<Value>,
}

/// Account details returned to the wallet page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AccountDetails {
    /// Account contract address.
    pub address: String,
    /// Account private key, exactly as stored by the backend.
    pub private_key: String,
}

impl From<AccountRecord> for AccountDetails {
    fn from(record: AccountRecord) -> Self {
        Self {
            address: record.address,
            private_key: record.private_key,
        }
    }
}

/// Backend's account view with the key material left out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PublicAccount {
    pub address: String,
    /// Hash string, or the last transfer result object.
    #[schema(value_type = Option<Object>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_tx_hash: Option<Value>,
}

// =============================================================================
// Payment Models
// =============================================================================

/// Request to create a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentIntentRequest {
    /// Amount in minor currency units (cents). Forwarded untouched.
    #[schema(value_type = Option<u64>)]
    #[serde(default)]
    pub amount: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: Option<String>,
}

/// Public configuration for the hosted payment widget.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfigResponse {
    pub publishable_key: Option<String>,
}

// =============================================================================
// Transfer Models
// =============================================================================

/// Request to move purchased STRK to the stored account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExecuteTransferRequest {
    #[schema(value_type = Option<f64>)]
    #[serde(default)]
    pub amount_strk: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExecuteTransferResponse {
    pub message: String,
    /// Backend payload, passed through.
    #[schema(value_type = Object)]
    pub data: Value,
}

/// Payload sent to the backend's transfer endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendTransfer {
    pub address: String,
    pub amount_strk: Value,
}

/// Request to gift STRK to an arbitrary address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SendGiftRequest {
    #[schema(value_type = Option<String>)]
    #[serde(default)]
    pub address: Value,
    #[schema(value_type = Option<f64>)]
    #[serde(default)]
    pub amount_strk: Value,
}

/// Request to stake STRK. `amount` may be a number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StakeRequest {
    #[schema(value_type = Option<String>)]
    #[serde(default)]
    pub amount: Value,
}

/// Payload sent to the backend's stake endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendStake {
    pub amount_strk: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StakeResponse {
    pub success: bool,
    /// Backend `message`; omitted when the backend sent none.
    #[schema(value_type = Option<String>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[schema(value_type = Option<String>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<Value>,
    /// Reason given alongside `success: false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Quote Models
// =============================================================================

/// USD quote for one token, keyed by the quote source's id
/// (`{"starknet": {"usd": 0.39}}`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UsdQuote {
    pub usd: f64,
}

/// Coerce a JSON value the way `parseFloat` does for the stake form:
/// numbers pass through, strings are read by [`parse_float`], everything
/// else is not a number.
pub fn coerce_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    }
}

/// JavaScript `parseFloat`: the longest decimal prefix after leading
/// whitespace, so `"12 STRK"` is 12 and `"0x10"` is 0. `None` where
/// `parseFloat` gives `NaN` or an infinity, both of which serialize as
/// `null`.
pub fn parse_float(input: &str) -> Option<f64> {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `amount_strk` counts as present only when it is a non-zero number or
/// numeric string.
pub fn transfer_amount_present(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}
