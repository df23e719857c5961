// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only Starknet queries for the header and wallet views.
//!
//! This module provides functionality for:
//! - Querying STRK and ETH balances (ERC-20 `balanceOf`)
//! - Listing recent STRK `Transfer` events touching an address
//! - Reading a member's shares in a delegation pool
//!
//! Nothing here signs or submits transactions; that is the backend's job.

pub mod client;
pub mod types;

pub use client::{ChainError, StarknetReader};
pub use types::*;
