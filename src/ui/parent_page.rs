// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Parent view: stake STRK for the child.

use serde_json::Value;
use tracing::error;

use super::{
    api_client::{ClientError, GiftApi},
    explorer_tx_link, parse_number, DEFAULT_EXPLORER_TX_URL,
};

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount";
pub const STAKING_FAILED_MESSAGE: &str = "Staking failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeSuccess {
    pub message: String,
    pub tx_hash: String,
    pub explorer_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentPage {
    /// Connected wallet, sent along with the stake request.
    pub address: Option<String>,
    pub stake_amount: String,
    pub is_staking: bool,
    pub stake_error: Option<String>,
    pub success: Option<StakeSuccess>,
    pub explorer_tx_url: String,
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl ParentPage {
    pub fn new(address: Option<String>) -> Self {
        Self::with_explorer(address, DEFAULT_EXPLORER_TX_URL)
    }

    pub fn with_explorer(address: Option<String>, explorer_tx_url: impl Into<String>) -> Self {
        Self {
            address,
            stake_amount: String::new(),
            is_staking: false,
            stake_error: None,
            success: None,
            explorer_tx_url: explorer_tx_url.into(),
        }
    }

    pub fn set_stake_amount(&mut self, input: &str) {
        self.stake_amount = input.to_string();
    }

    pub fn can_stake(&self) -> bool {
        !self.is_staking && !self.stake_amount.is_empty()
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_staking {
            "Staking..."
        } else {
            "Stake"
        }
    }

    pub async fn stake(&mut self, api: &dyn GiftApi) {
        if parse_number(&self.stake_amount).is_none() {
            self.stake_error = Some(INVALID_AMOUNT_MESSAGE.to_string());
            return;
        }

        self.is_staking = true;
        self.stake_error = None;
        self.success = None;

        match api.stake(&self.stake_amount, self.address.as_deref()).await {
            Ok(reply) if reply.success => {
                self.stake_amount.clear();
                let tx_hash = text_of(reply.tx_hash.as_ref());
                self.success = Some(StakeSuccess {
                    message: text_of(reply.output.as_ref()),
                    explorer_url: explorer_tx_link(&self.explorer_tx_url, &tx_hash),
                    tx_hash,
                });
            }
            Ok(reply) => {
                self.stake_error =
                    Some(reply.error.unwrap_or_else(|| STAKING_FAILED_MESSAGE.to_string()));
            }
            Err(ClientError::Status { .. }) => {
                self.stake_error = Some(STAKING_FAILED_MESSAGE.to_string());
            }
            Err(e) => {
                error!(error = %e, "Staking error");
                self.stake_error = Some(e.to_string());
            }
        }
        self.is_staking = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StakeResponse;
    use crate::ui::fake::FakeApi;
    use serde_json::json;

    #[tokio::test]
    async fn non_numeric_amount_is_rejected_locally() {
        let api = FakeApi::default();
        let mut page = ParentPage::new(None);
        page.set_stake_amount("ten");

        page.stake(&api).await;
        assert_eq!(page.stake_error.as_deref(), Some(INVALID_AMOUNT_MESSAGE));
        assert!(api.calls().is_empty());

        page.set_stake_amount("");
        assert!(!page.can_stake());
    }

    #[tokio::test]
    async fn success_clears_input_and_links_transaction() {
        let api = FakeApi {
            stake: Some(Ok(StakeResponse {
                success: true,
                output: Some(json!("Staked 5 STRK")),
                tx_hash: Some(json!("0x5a")),
                error: None,
            })),
            ..Default::default()
        };
        let mut page = ParentPage::new(Some("0x1".into()));
        page.set_stake_amount("5");

        page.stake(&api).await;

        assert_eq!(api.calls(), ["stake 5"]);
        assert!(page.stake_amount.is_empty());
        let success = page.success.clone().unwrap();
        assert_eq!(success.message, "Staked 5 STRK");
        assert_eq!(success.explorer_url, "https://sepolia.voyager.online/tx/0x5a");
        assert_eq!(page.button_label(), "Stake");
    }

    #[tokio::test]
    async fn failed_response_shows_generic_error() {
        let api = FakeApi {
            stake: Some(Err(ClientError::Status {
                status: 400,
                body: json!({"error": "Amount exceeds balance"}),
            })),
            ..Default::default()
        };
        let mut page = ParentPage::new(None);
        page.set_stake_amount("500");

        page.stake(&api).await;
        assert_eq!(page.stake_error.as_deref(), Some(STAKING_FAILED_MESSAGE));
        assert_eq!(page.stake_amount, "500");
        assert!(!page.is_staking);
    }

    #[tokio::test]
    async fn unsuccessful_reply_shows_its_error() {
        let declined = |error: Option<&str>| FakeApi {
            stake: Some(Ok(StakeResponse {
                success: false,
                output: None,
                tx_hash: None,
                error: error.map(str::to_string),
            })),
            ..Default::default()
        };
        let mut page = ParentPage::new(None);

        page.set_stake_amount("5");
        page.stake(&declined(Some("Pool is closed"))).await;
        assert_eq!(page.stake_error.as_deref(), Some("Pool is closed"));
        assert!(page.success.is_none());

        page.stake(&declined(None)).await;
        assert_eq!(page.stake_error.as_deref(), Some(STAKING_FAILED_MESSAGE));
        assert_eq!(page.stake_amount, "5");
    }

    #[tokio::test]
    async fn success_links_to_configured_explorer() {
        let api = FakeApi {
            stake: Some(Ok(StakeResponse {
                success: true,
                output: Some(json!("Staked")),
                tx_hash: Some(json!("0x5a")),
                error: None,
            })),
            ..Default::default()
        };
        let mut page = ParentPage::with_explorer(None, "https://starkscan.co/tx/");
        page.set_stake_amount("1");

        page.stake(&api).await;
        assert_eq!(
            page.success.map(|s| s.explorer_url).as_deref(),
            Some("https://starkscan.co/tx/0x5a")
        );
    }
}
