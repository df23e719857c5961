// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`AppConfig`] struct built from them. Configuration is loaded from the
//! environment once at startup and handed to every handler through
//! [`crate::state::AppState`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `BACKEND_URL` | Account/staking/transfer backend | `http://localhost:8000` |
//! | `ACCOUNT_FILE` | Account record written by the backend | `../backend/new_account.json` |
//! | `STRIPE_SECRET_KEY` | Payment processor secret key | Required |
//! | `STRIPE_PUBLISHABLE_KEY` | Key handed to the hosted payment widget | Optional |
//! | `STRIPE_API_BASE_URL` | Payment processor API base | `https://api.stripe.com` |
//! | `STRIPE_API_VERSION` | Payment processor API version | `2024-12-18.acacia` |
//! | `PRICE_API_URL` | Token price quote source | `https://api.coingecko.com/api/v3` |
//! | `STARKNET_RPC_URL` | Starknet JSON-RPC node | Optional |
//! | `STAKING_POOL_ADDRESS` | Delegation pool for staked-amount queries | Optional |
//! | `EXPLORER_TX_URL` | Block explorer transaction prefix | `https://sepolia.voyager.online/tx/` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use url::Url;

use crate::logging::LogFormat;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";
pub const ACCOUNT_FILE_ENV: &str = "ACCOUNT_FILE";
pub const STRIPE_SECRET_KEY_ENV: &str = "STRIPE_SECRET_KEY";
pub const STRIPE_PUBLISHABLE_KEY_ENV: &str = "STRIPE_PUBLISHABLE_KEY";
pub const STRIPE_API_BASE_URL_ENV: &str = "STRIPE_API_BASE_URL";
pub const STRIPE_API_VERSION_ENV: &str = "STRIPE_API_VERSION";
pub const PRICE_API_URL_ENV: &str = "PRICE_API_URL";
pub const STARKNET_RPC_URL_ENV: &str = "STARKNET_RPC_URL";
pub const STAKING_POOL_ADDRESS_ENV: &str = "STAKING_POOL_ADDRESS";
pub const EXPLORER_TX_URL_ENV: &str = "EXPLORER_TX_URL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// The backend writes the most recently created account here, relative to
/// the working directory of this service.
pub const DEFAULT_ACCOUNT_FILE: &str = "../backend/new_account.json";
pub const DEFAULT_STRIPE_API_BASE_URL: &str = "https://api.stripe.com";
pub const DEFAULT_STRIPE_API_VERSION: &str = "2024-12-18.acacia";
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_EXPLORER_TX_URL: &str = "https://sepolia.voyager.online/tx/";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not defined")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process-wide configuration, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend_url: String,
    pub account_file: PathBuf,
    pub stripe_secret_key: String,
    pub stripe_publishable_key: Option<String>,
    pub stripe_api_base_url: String,
    pub stripe_api_version: String,
    pub price_api_url: String,
    pub starknet_rpc_url: Option<String>,
    pub staking_pool_address: Option<String>,
    pub explorer_tx_url: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Configuration with every optional value at its default.
    ///
    /// Only the payment processor secret has no sensible default.
    pub fn new(stripe_secret_key: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            account_file: PathBuf::from(DEFAULT_ACCOUNT_FILE),
            stripe_secret_key: stripe_secret_key.into(),
            stripe_publishable_key: None,
            stripe_api_base_url: DEFAULT_STRIPE_API_BASE_URL.to_string(),
            stripe_api_version: DEFAULT_STRIPE_API_VERSION.to_string(),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            starknet_rpc_url: None,
            staking_pool_address: None,
            explorer_tx_url: DEFAULT_EXPLORER_TX_URL.to_string(),
            log_format: LogFormat::Pretty,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let secret = get(STRIPE_SECRET_KEY_ENV).ok_or(ConfigError::Missing(STRIPE_SECRET_KEY_ENV))?;
        let mut config = Self::new(secret);

        if let Some(host) = get(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = get(PORT_ENV) {
            config.port = port.parse().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: format!("{e}"),
            })?;
        }
        if let Some(url) = get(BACKEND_URL_ENV) {
            config.backend_url = parse_url(BACKEND_URL_ENV, &url)?;
        }
        if let Some(path) = get(ACCOUNT_FILE_ENV) {
            config.account_file = PathBuf::from(path);
        }
        config.stripe_publishable_key = get(STRIPE_PUBLISHABLE_KEY_ENV);
        if let Some(url) = get(STRIPE_API_BASE_URL_ENV) {
            config.stripe_api_base_url = parse_url(STRIPE_API_BASE_URL_ENV, &url)?;
        }
        if let Some(version) = get(STRIPE_API_VERSION_ENV) {
            config.stripe_api_version = version;
        }
        if let Some(url) = get(PRICE_API_URL_ENV) {
            config.price_api_url = parse_url(PRICE_API_URL_ENV, &url)?;
        }
        config.starknet_rpc_url = get(STARKNET_RPC_URL_ENV)
            .map(|url| parse_url(STARKNET_RPC_URL_ENV, &url))
            .transpose()?;
        config.staking_pool_address = get(STAKING_POOL_ADDRESS_ENV);
        if let Some(prefix) = get(EXPLORER_TX_URL_ENV) {
            config.explorer_tx_url = prefix;
        }
        if let Some(format) = get(LOG_FORMAT_ENV) {
            config.log_format = format.parse().map_err(|reason| ConfigError::Invalid {
                name: LOG_FORMAT_ENV,
                reason,
            })?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid {
                name: HOST_ENV,
                reason: format!("{e}"),
            })
    }

    pub fn account_file(&self) -> &Path {
        &self.account_file
    }

    /// Block explorer link for a transaction hash.
    pub fn explorer_tx_link(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_tx_url, tx_hash)
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    Url::parse(raw)
        .map(|_| raw.trim_end_matches('/').to_string())
        .map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        })
}
