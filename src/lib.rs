// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! StarkGift - card-to-STRK gifting service
//!
//! Buyers pay by card, and the purchased STRK is delivered to a freshly
//! deployed Starknet account that can then be gifted on or staked. All
//! on-chain work is done by an external backend; this crate serves the
//! `/api` routes in front of it and holds the page logic of the web flows.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `providers` - Stripe, backend and price-source clients
//! - `chain` - Read-only Starknet queries
//! - `storage` - The backend's account record
//! - `ui` - Page state for checkout, gifting, staking and the header

pub mod address;
pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod state;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod test_support;
