// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Starknet JSON-RPC reader.

use starknet::{
    core::{
        types::{BlockId, BlockTag, EmittedEvent, EventFilter, Felt, FunctionCall},
        utils::get_selector_from_name,
    },
    providers::{jsonrpc::HttpTransport, JsonRpcClient, Provider},
};
use tracing::{debug, warn};

use super::types::*;

/// Events requested per `starknet_getEvents` page.
const EVENTS_CHUNK_SIZE: u64 = 1_000;

/// Pages followed per key filter before giving up on older history.
const MAX_EVENT_PAGES: usize = 5;

/// Read-only Starknet client.
pub struct StarknetReader {
    provider: JsonRpcClient<HttpTransport>,
}

impl StarknetReader {
    /// Create a reader for the given JSON-RPC endpoint.
    pub fn new(rpc_url: &str) -> Result<Self, ChainError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainError::InvalidRpcUrl(e.to_string()))?;

        Ok(Self {
            provider: JsonRpcClient::new(HttpTransport::new(url)),
        })
    }

    /// Get the ERC-20 balance of `account` for `token`.
    pub async fn token_balance(
        &self,
        account: &str,
        token: &TokenInfo,
    ) -> Result<TokenBalance, ChainError> {
        let owner = parse_address(account)?;
        let result = self
            .call(parse_address(token.address)?, "balanceOf", vec![owner])
            .await?;
        let balance = decode_u256(&result)?;

        Ok(TokenBalance {
            symbol: token.symbol.to_string(),
            name: token.name.to_string(),
            balance_raw: balance.to_string(),
            balance_formatted: format_balance(balance, token.decimals),
            decimals: token.decimals,
            contract_address: token.address.to_string(),
        })
    }

    /// STRK and ETH balances, in display order.
    pub async fn header_balances(&self, account: &str) -> Result<AccountBalances, ChainError> {
        let mut balances = Vec::with_capacity(HEADER_TOKENS.len());
        for token in &HEADER_TOKENS {
            balances.push(self.token_balance(account, token).await?);
        }

        Ok(AccountBalances {
            address: felt_hex(&parse_address(account)?),
            balances,
        })
    }

    /// `Transfer` events of `token` sent or received by `account` within the
    /// last `window` blocks, newest first.
    ///
    /// Assumes the Cairo 1 event layout where `from` and `to` are keys, so
    /// both directions can be filtered on the node.
    pub async fn transfer_history(
        &self,
        account: &str,
        token: &TokenInfo,
        window: u64,
    ) -> Result<TransferHistory, ChainError> {
        let owner = parse_address(account)?;
        let token_address = parse_address(token.address)?;
        let selector = selector("Transfer")?;
        let latest = self
            .provider
            .block_number()
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))?;
        let from_block = latest.saturating_sub(window);

        let owner_hex = felt_hex(&owner);
        let sent = vec![vec![selector], vec![owner]];
        let received = vec![vec![selector], vec![], vec![owner]];

        let mut events = Vec::new();
        for (keys, incoming) in [(sent, false), (received, true)] {
            let filter = EventFilter {
                from_block: Some(BlockId::Number(from_block)),
                to_block: Some(BlockId::Tag(BlockTag::Latest)),
                address: Some(token_address),
                keys: Some(keys),
            };
            for event in self.collect_events(filter).await? {
                let decoded = decode_transfer(&event.keys, &event.data, token.decimals).map(
                    |(from, to, value_raw, value_formatted)| TransferEvent {
                        from,
                        to,
                        value_raw,
                        value_formatted,
                        block_number: event.block_number,
                        transaction_hash: felt_hex(&event.transaction_hash),
                        explorer_url: None,
                    },
                );
                match decoded {
                    // Self-transfers match both filters and are kept from the sent side.
                    Some(transfer) if incoming && transfer.from == owner_hex => {}
                    Some(transfer) => events.push(transfer),
                    None => warn!(tx = %felt_hex(&event.transaction_hash), "Skipping malformed Transfer event"),
                }
            }
        }

        // Stable: events within a block keep the order the node returned them in.
        events.sort_by(|a, b| b.block_number.cmp(&a.block_number));

        Ok(TransferHistory {
            address: owner_hex,
            token: token.symbol.to_string(),
            events,
        })
    }

    /// Shares `member` holds in the delegation pool at `pool`.
    pub async fn pool_member_shares(
        &self,
        pool: &str,
        member: &str,
    ) -> Result<StakedAmount, ChainError> {
        let pool_address = parse_address(pool)?;
        let member_address = parse_address(member)?;
        let result = self
            .call(pool_address, "pool_member_info", vec![member_address])
            .await?;

        let shares = result
            .first()
            .ok_or_else(|| ChainError::ContractError("pool_member_info returned nothing".into()))
            .and_then(felt_to_u128)?;

        Ok(StakedAmount {
            pool_member: felt_hex(&member_address),
            pool: felt_hex(&pool_address),
            shares_raw: shares.to_string(),
            shares_formatted: format_balance(shares, STRK_TOKEN.decimals),
        })
    }

    /// Get the current block number.
    pub async fn block_number(&self) -> Result<u64, ChainError> {
        self.provider
            .block_number()
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))
    }

    async fn call(
        &self,
        contract_address: Felt,
        function: &str,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, ChainError> {
        debug!(contract = %felt_hex(&contract_address), function, "starknet_call");
        self.provider
            .call(
                FunctionCall {
                    contract_address,
                    entry_point_selector: selector(function)?,
                    calldata,
                },
                BlockId::Tag(BlockTag::Latest),
            )
            .await
            .map_err(|e| ChainError::ContractError(format!("{function}: {e}")))
    }

    async fn collect_events(&self, filter: EventFilter) -> Result<Vec<EmittedEvent>, ChainError> {
        let mut events = Vec::new();
        let mut continuation = None;

        for _ in 0..MAX_EVENT_PAGES {
            let page = self
                .provider
                .get_events(filter.clone(), continuation, EVENTS_CHUNK_SIZE)
                .await
                .map_err(|e| ChainError::RpcError(e.to_string()))?;
            events.extend(page.events);

            match page.continuation_token {
                Some(token) => continuation = Some(token),
                None => return Ok(events),
            }
        }

        warn!(max_pages = MAX_EVENT_PAGES, "Event history truncated");
        Ok(events)
    }
}

fn selector(name: &str) -> Result<Felt, ChainError> {
    get_selector_from_name(name).map_err(|e| ChainError::ContractError(e.to_string()))
}

/// Parse a `0x` felt. Short forms are accepted and padded on output.
pub fn parse_address(address: &str) -> Result<Felt, ChainError> {
    let trimmed = address.trim();
    if !trimmed.starts_with("0x") {
        return Err(ChainError::InvalidAddress(format!("{trimmed}: missing 0x prefix")));
    }
    Felt::from_hex(trimmed).map_err(|e| ChainError::InvalidAddress(format!("{trimmed}: {e}")))
}

/// Zero-padded 66-character hex form.
pub fn felt_hex(value: &Felt) -> String {
    let digits = value.to_hex_string();
    format!("0x{:0>64}", digits.trim_start_matches("0x"))
}

fn felt_to_u128(value: &Felt) -> Result<u128, ChainError> {
    let bytes = value.to_bytes_be();
    if bytes[..16].iter().any(|b| *b != 0) {
        return Err(ChainError::Overflow(felt_hex(value)));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&bytes[16..]);
    Ok(u128::from_be_bytes(low))
}

/// Decode a Cairo `u256` returned as `[low, high]`.
fn decode_u256(words: &[Felt]) -> Result<u128, ChainError> {
    match words {
        [low, high, ..] => {
            if *high != Felt::ZERO {
                return Err(ChainError::Overflow(format!(
                    "u256 high word {}",
                    felt_hex(high)
                )));
            }
            felt_to_u128(low)
        }
        // Cairo 0 tokens may answer with a single felt.
        [single] => felt_to_u128(single),
        [] => Err(ChainError::ContractError("empty u256 result".into())),
    }
}

/// Cairo 1 layout: keys `[selector, from, to]`, data `[low, high]`.
/// Cairo 0 layout: keys `[selector]`, data `[from, to, low, high]`.
///
/// Returns `(from, to, raw value, formatted value)`.
fn decode_transfer(
    keys: &[Felt],
    data: &[Felt],
    decimals: u8,
) -> Option<(String, String, String, String)> {
    let (from, to, value_words) = if keys.len() >= 3 {
        (keys[1], keys[2], data)
    } else if data.len() >= 3 {
        (data[0], data[1], &data[2..])
    } else {
        return None;
    };
    let value = decode_u256(value_words).ok()?;

    Some((
        felt_hex(&from),
        felt_hex(&to),
        value.to_string(),
        format_balance(value, decimals),
    ))
}

/// Errors that can occur during chain reads.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Value does not fit in 128 bits: {0}")]
    Overflow(String),
}
