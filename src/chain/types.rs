// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Starknet token metadata and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// ERC-20 token deployed on Starknet.
#[derive(Debug, Clone, Copy)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    /// Same address on mainnet and Sepolia.
    pub address: &'static str,
}

pub const STRK_TOKEN: TokenInfo = TokenInfo {
    symbol: "STRK",
    name: "Starknet Token",
    decimals: 18,
    address: "0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d",
};

pub const ETH_TOKEN: TokenInfo = TokenInfo {
    symbol: "ETH",
    name: "Ether",
    decimals: 18,
    address: "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7",
};

/// Tokens shown in the header, in display order.
pub const HEADER_TOKENS: [TokenInfo; 2] = [STRK_TOKEN, ETH_TOKEN];

/// Blocks scanned back from the tip for transfer history.
pub const TRANSFER_HISTORY_WINDOW: u64 = 10_000;

/// Token balance information.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TokenBalance {
    /// Token symbol (e.g., "STRK")
    pub symbol: String,
    /// Token name
    pub name: String,
    /// Balance in the token's smallest unit
    pub balance_raw: String,
    /// Balance formatted with decimals
    pub balance_formatted: String,
    pub decimals: u8,
    pub contract_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AccountBalances {
    pub address: String,
    pub balances: Vec<TokenBalance>,
}

/// One ERC-20 `Transfer` event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransferEvent {
    pub from: String,
    pub to: String,
    pub value_raw: String,
    pub value_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    pub transaction_hash: String,
    /// Filled in by the API layer from the configured explorer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransferHistory {
    pub address: String,
    pub token: String,
    pub events: Vec<TransferEvent>,
}

/// Delegation pool membership of one address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StakedAmount {
    pub pool_member: String,
    pub pool: String,
    pub shares_raw: String,
    pub shares_formatted: String,
}

/// Format a raw amount with the given number of decimals, keeping at most
/// six fractional digits.
pub fn format_balance(balance: u128, decimals: u8) -> String {
    if balance == 0 {
        return "0".to_string();
    }

    let divisor = 10u128.pow(u32::from(decimals));
    let whole = balance / divisor;
    let remainder = balance % divisor;

    if remainder == 0 {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, &trimmed[..trimmed.len().min(6)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_balance() {
        // 1 STRK = 1e18
        assert_eq!(format_balance(1_000_000_000_000_000_000, 18), "1");
        assert_eq!(format_balance(500_000_000_000_000_000, 18), "0.5");
        // truncated to 6 decimals
        assert_eq!(format_balance(1_234_567_890_000_000_000, 18), "1.234567");
        assert_eq!(format_balance(25_400_000_000_000_000_000, 18), "25.4");
        assert_eq!(format_balance(0, 18), "0");
        assert_eq!(format_balance(1_000_000, 6), "1");
    }

    #[test]
    fn token_addresses_are_full_length() {
        for token in HEADER_TOKENS {
            assert_eq!(token.address.len(), 66, "{}", token.symbol);
        }
    }
}
