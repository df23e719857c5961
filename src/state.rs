// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state.
//!
//! Every upstream client is built once at startup from [`AppConfig`] and
//! handed to handlers through axum's `State` extractor.

use std::sync::Arc;

use crate::{
    chain::{ChainError, StarknetReader},
    config::AppConfig,
    providers::{BackendClient, PriceClient, PriceError, StripeClient, StripeError},
    storage::{AccountStore, FileAccountStore},
};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Stripe(#[from] StripeError),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountStore>,
    pub backend: BackendClient,
    pub payments: StripeClient,
    pub prices: PriceClient,
    /// Absent when no RPC node is configured.
    pub chain: Option<Arc<StarknetReader>>,
}

impl AppState {
    /// Build state backed by the account file named in `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, StateError> {
        let accounts = Arc::new(FileAccountStore::new(config.account_file()));
        Self::with_store(config, accounts)
    }

    pub fn with_store(
        config: AppConfig,
        accounts: Arc<dyn AccountStore>,
    ) -> Result<Self, StateError> {
        let chain = match config.starknet_rpc_url.as_deref() {
            Some(url) => Some(Arc::new(StarknetReader::new(url)?)),
            None => None,
        };

        Ok(Self {
            backend: BackendClient::from_config(&config),
            payments: StripeClient::from_config(&config)?,
            prices: PriceClient::from_config(&config)?,
            chain,
            accounts,
            config: Arc::new(config),
        })
    }
}
