// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Scripted [`GiftApi`] for page tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::api_client::{ClientError, GiftApi};
use crate::{
    chain::AccountBalances,
    models::{AccountDetails, PublicAccount, StakeResponse},
};

/// Each `None` reply is a network failure. Every call is recorded.
#[derive(Default)]
pub struct FakeApi {
    pub price: Option<f64>,
    /// Defaults to a success body.
    pub transfer: Option<Result<Value, ClientError>>,
    pub account: Option<AccountDetails>,
    pub backend_account: Option<PublicAccount>,
    pub gift: Option<Result<Value, ClientError>>,
    pub stake: Option<Result<StakeResponse, ClientError>>,
    pub deploy: Option<Result<Value, ClientError>>,
    pub balances: Option<AccountBalances>,
    pub(crate) calls: Mutex<Vec<String>>,
}

fn offline<T>(reply: &Option<Result<T, ClientError>>) -> Result<T, ClientError>
where
    T: Clone,
{
    reply
        .clone()
        .unwrap_or_else(|| Err(ClientError::Request("fetch failed".into())))
}

impl FakeApi {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GiftApi for FakeApi {
    async fn token_price(&self, symbol: &str) -> Result<f64, ClientError> {
        self.record(format!("price {symbol}"));
        self.price
            .ok_or_else(|| ClientError::Request("price source down".into()))
    }

    async fn create_payment_intent(&self, amount_cents: u64) -> Result<Option<String>, ClientError> {
        self.record(format!("intent {amount_cents}"));
        Ok(Some(format!("pi_secret_{amount_cents}")))
    }

    async fn execute_transfer(&self, amount_strk: f64) -> Result<Value, ClientError> {
        self.record(format!("transfer {amount_strk}"));
        self.transfer
            .clone()
            .unwrap_or_else(|| Ok(json!({"message": "Transfer successful"})))
    }

    async fn account_details(&self) -> Result<AccountDetails, ClientError> {
        self.record("account details".into());
        self.account
            .clone()
            .ok_or_else(|| ClientError::Request("fetch failed".into()))
    }

    async fn backend_account(&self) -> Result<PublicAccount, ClientError> {
        self.record("backend account".into());
        self.backend_account
            .clone()
            .ok_or_else(|| ClientError::Request("fetch failed".into()))
    }

    async fn send_gift(&self, address: &str, amount_strk: f64) -> Result<Value, ClientError> {
        self.record(format!("gift {address} {amount_strk}"));
        offline(&self.gift)
    }

    async fn stake(&self, amount: &str, _address: Option<&str>) -> Result<StakeResponse, ClientError> {
        self.record(format!("stake {amount}"));
        offline(&self.stake)
    }

    async fn create_deploy(&self) -> Result<Value, ClientError> {
        self.record("create deploy".into());
        offline(&self.deploy)
    }

    async fn balances(&self, address: &str) -> Result<AccountBalances, ClientError> {
        self.record(format!("balances {address}"));
        self.balances
            .clone()
            .ok_or_else(|| ClientError::Request("fetch failed".into()))
    }
}
