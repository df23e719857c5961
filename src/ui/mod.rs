// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Page logic for the browser flows, without rendering.
//!
//! Each page is a plain struct holding the state its template would show:
//! form inputs, loading flags, modal contents, error text and navigation
//! targets. Network calls go through [`GiftApi`] so a page can be driven
//! against the real service or an in-process fake.

pub mod api_client;
#[cfg(test)]
mod fake;
pub mod gift_page;
pub mod header;
pub mod parent_page;
pub mod payment_form;

pub use api_client::{ClientError, GiftApi, HttpGiftApi};
pub use gift_page::{Contact, GiftModal, GiftPage};
pub use header::{AccountHeader, ConnectError, WalletConnector, BRAAVOS_CONNECTOR_ID};
pub use parent_page::{ParentPage, StakeSuccess};
pub use payment_form::{
    ConfirmOutcome, PaymentConfirmer, PaymentForm, PaymentReceipt, TRANSFER_RATE,
};

pub use crate::config::DEFAULT_EXPLORER_TX_URL;

/// Block explorer page for a transaction under `explorer_tx_url`, the same
/// prefix the service is configured with (`EXPLORER_TX_URL`).
pub fn explorer_tx_link(explorer_tx_url: &str, tx_hash: &str) -> String {
    format!("{explorer_tx_url}{tx_hash}")
}

/// Read a form field the way `Number()` does for whole-field checks:
/// surrounding whitespace ignored, trailing text, `NaN` and infinities
/// rejected. Amounts sent on to a route use [`crate::models::parse_float`].
pub(crate) fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Shortest decimal form of an amount: `10` rather than `10.0`.
pub(crate) fn display_amount(amount: f64) -> String {
    let text = amount.to_string();
    text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_link_joins_prefix_and_hash() {
        assert_eq!(
            explorer_tx_link(DEFAULT_EXPLORER_TX_URL, "0xabc"),
            "https://sepolia.voyager.online/tx/0xabc"
        );
        assert_eq!(
            explorer_tx_link("https://starkscan.co/tx/", "0xabc"),
            "https://starkscan.co/tx/0xabc"
        );
    }

    #[test]
    fn numbers_parse_like_number_inputs() {
        assert_eq!(parse_number("2.5"), Some(2.5));
        assert_eq!(parse_number(" 3 "), Some(3.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("12 STRK"), None);
    }

    #[test]
    fn amounts_display_without_trailing_zero() {
        assert_eq!(display_amount(10.0), "10");
        assert_eq!(display_amount(25.4), "25.4");
    }
}
