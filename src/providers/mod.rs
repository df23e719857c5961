// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Clients for the services this one fronts.
//!
//! - `backend` - account creation, transfers, gifts and staking
//! - `price` - USD token quotes
//! - `stripe` - card payment intents

pub mod backend;
pub mod price;
pub mod stripe;

pub use backend::{BackendClient, BackendError, BackendReply};
pub use price::{PriceClient, PriceError, PriceQuote};
pub use stripe::{PaymentIntent, StripeClient, StripeError};
