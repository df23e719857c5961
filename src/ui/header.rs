// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Header account controls: create-and-deploy plus wallet pairing.
//!
//! The two steps are not transactional. If pairing fails the account has
//! still been created, and only the pairing error is shown.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, warn};

use super::api_client::GiftApi;
use crate::{address::shorten, chain::AccountBalances};

pub const BRAAVOS_CONNECTOR_ID: &str = "braavos";
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect account";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConnectError(pub String);

/// Browser wallet extension pairing.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn connect(&self, connector_id: &str) -> Result<(), ConnectError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountHeader {
    /// `data` of the create-deploy answer.
    pub created_account: Option<Value>,
    /// Address reported by the paired wallet, if any.
    pub connected_address: Option<String>,
    pub is_creating: bool,
    pub error: Option<String>,
    pub balances: Option<AccountBalances>,
}

impl AccountHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_connected_address(&mut self, address: Option<String>) {
        self.connected_address = address;
    }

    /// The create button shows only while no wallet is paired.
    pub fn show_create_button(&self) -> bool {
        self.connected_address.is_none()
    }

    /// Created account first, then the paired wallet.
    pub fn display_address(&self) -> Option<String> {
        self.created_account
            .as_ref()
            .and_then(|data| data.get("address"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| self.connected_address.clone())
    }

    pub fn short_address(&self) -> Option<String> {
        self.display_address().as_deref().map(shorten)
    }

    pub async fn create_and_deploy(&mut self, api: &dyn GiftApi, connector: &dyn WalletConnector) {
        self.is_creating = true;
        self.error = None;

        match api.create_deploy().await {
            Ok(body) => {
                self.created_account = body.get("data").cloned();
                if let Err(e) = connector.connect(BRAAVOS_CONNECTOR_ID).await {
                    error!(error = %e, "Wallet pairing failed after account creation");
                    self.error = Some(if e.0.is_empty() {
                        CONNECT_FAILED_MESSAGE.to_string()
                    } else {
                        e.0
                    });
                }
            }
            Err(e) => {
                error!(error = %e, "Account creation failed");
                self.error = Some(e.to_string());
            }
        }
        self.is_creating = false;
    }

    /// Balances for the displayed address; kept as-is on failure.
    pub async fn refresh_balances(&mut self, api: &dyn GiftApi) {
        let Some(address) = self.display_address() else {
            return;
        };
        match api.balances(&address).await {
            Ok(balances) => self.balances = Some(balances),
            Err(e) => warn!(error = %e, %address, "Balance lookup failed"),
        }
    }

    /// `(symbol, formatted balance)` pairs for display.
    pub fn balance_lines(&self) -> Vec<(String, String)> {
        self.balances
            .iter()
            .flat_map(|b| b.balances.iter())
            .map(|token| (token.symbol.clone(), token.balance_formatted.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::TokenBalance;
    use crate::test_support::TEST_ADDRESS;
    use crate::ui::{fake::FakeApi, ClientError};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeWallet {
        fail_with: Option<String>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WalletConnector for FakeWallet {
        async fn connect(&self, connector_id: &str) -> Result<(), ConnectError> {
            self.requested.lock().unwrap().push(connector_id.to_string());
            match &self.fail_with {
                Some(message) => Err(ConnectError(message.clone())),
                None => Ok(()),
            }
        }
    }

    fn deployed() -> FakeApi {
        FakeApi {
            deploy: Some(Ok(json!({"status": "success", "data": {"address": TEST_ADDRESS}}))),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creates_account_then_pairs_braavos() {
        let api = deployed();
        let wallet = FakeWallet::default();
        let mut header = AccountHeader::new();

        header.create_and_deploy(&api, &wallet).await;

        assert_eq!(wallet.requested.lock().unwrap().as_slice(), ["braavos"]);
        assert!(header.error.is_none());
        assert!(!header.is_creating);
        assert_eq!(header.short_address().as_deref(), Some("0x0530...9544"));
    }

    #[tokio::test]
    async fn pairing_failure_keeps_created_account() {
        let api = deployed();
        let wallet = FakeWallet {
            fail_with: Some("User rejected".into()),
            ..Default::default()
        };
        let mut header = AccountHeader::new();

        header.create_and_deploy(&api, &wallet).await;

        assert_eq!(header.error.as_deref(), Some("User rejected"));
        assert_eq!(header.display_address().as_deref(), Some(TEST_ADDRESS));

        let silent = FakeWallet {
            fail_with: Some(String::new()),
            ..Default::default()
        };
        header.create_and_deploy(&api, &silent).await;
        assert_eq!(header.error.as_deref(), Some(CONNECT_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn http_failure_reports_status_and_skips_pairing() {
        let api = FakeApi {
            deploy: Some(Err(ClientError::Status {
                status: 500,
                body: json!({"error": "Faucet is empty"}),
            })),
            ..Default::default()
        };
        let wallet = FakeWallet::default();
        let mut header = AccountHeader::new();

        header.create_and_deploy(&api, &wallet).await;

        assert_eq!(header.error.as_deref(), Some("HTTP error! status: 500"));
        assert!(wallet.requested.lock().unwrap().is_empty());
        assert!(header.display_address().is_none());
    }

    #[tokio::test]
    async fn connected_wallet_is_the_fallback_address() {
        let mut header = AccountHeader::new();
        assert!(header.show_create_button());

        header.set_connected_address(Some("0x04a69af1ef2d19c4e7ef379f6ff4c1a36e78d10fd5c8f96f0ea41012052a8e7c".into()));
        assert!(!header.show_create_button());
        assert_eq!(header.short_address().as_deref(), Some("0x04a6...8e7c"));
    }

    #[tokio::test]
    async fn balances_follow_display_address() {
        let api = FakeApi {
            balances: Some(AccountBalances {
                address: TEST_ADDRESS.into(),
                balances: vec![TokenBalance {
                    symbol: "STRK".into(),
                    name: "Starknet Token".into(),
                    balance_raw: "25400000000000000000".into(),
                    balance_formatted: "25.4".into(),
                    decimals: 18,
                    contract_address: "0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d".into(),
                }],
            }),
            ..Default::default()
        };
        let mut header = AccountHeader::new();
        header.refresh_balances(&api).await;
        assert!(api.calls().is_empty());

        header.set_connected_address(Some(TEST_ADDRESS.into()));
        header.refresh_balances(&api).await;
        assert_eq!(header.balance_lines(), [("STRK".to_string(), "25.4".to_string())]);
    }
}
