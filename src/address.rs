// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Recipient address checks and Starknet ID shortcuts.
//!
//! Only the shape of the input is checked: a `0x`-prefixed string of 66
//! characters, or a name ending in `.stark`. Nothing is verified on chain.

/// Length of a fully padded Starknet address, `0x` included.
pub const HEX_ADDRESS_LEN: usize = 66;

pub const STARK_DOMAIN_SUFFIX: &str = ".stark";

/// Starknet IDs the gift page resolves without a naming-service lookup.
pub const STARKNET_ID_MAP: &[(&str, &str)] = &[(
    "tom.stark",
    "0x0530f347bb9aad521c36d803f44957242dbf67cb52078609e3c3cfb5a82e9544",
)];

/// Whether `input` looks like a recipient the gift flow accepts.
pub fn is_valid_recipient(input: &str) -> bool {
    is_hex_address(input) || is_stark_domain(input)
}

pub fn is_hex_address(input: &str) -> bool {
    input.starts_with("0x") && input.chars().count() == HEX_ADDRESS_LEN
}

/// `.stark` is matched case-insensitively.
pub fn is_stark_domain(input: &str) -> bool {
    input.to_lowercase().ends_with(STARK_DOMAIN_SUFFIX)
}

/// Map a known Starknet ID to its address; anything else passes through.
pub fn resolve_recipient(input: &str) -> String {
    let key = input.to_lowercase();
    STARKNET_ID_MAP
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, address)| address.to_string())
        .unwrap_or_else(|| input.to_string())
}

/// `0x1234...abcd` form used in headers and modals.
pub fn shorten(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Label for a recipient typed by hand: the name part of a `.stark`
/// domain, otherwise a generic label.
pub fn recipient_label(input: &str) -> String {
    if input.ends_with(STARK_DOMAIN_SUFFIX) {
        input.split('.').next().unwrap_or(input).to_string()
    } else {
        "Custom Address".to_string()
    }
}
