// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet details and gift sending.

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tracing::{error, warn};

use super::{
    api_client::{ClientError, GiftApi},
    display_amount, explorer_tx_link, DEFAULT_EXPLORER_TX_URL,
};
use crate::{
    address::{is_valid_recipient, recipient_label, resolve_recipient, shorten},
    models::{parse_float, AccountRecord},
};

pub const INVALID_ADDRESS_MESSAGE: &str = "Please enter a valid Starknet address";
pub const GIFT_FAILED_MESSAGE: &str = "Failed to send gift";
pub const HIDDEN_KEY: &str = "••••••••••••••••";
const LOADING: &str = "Loading...";

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub address: String,
    pub amount: f64,
    pub last_used: Option<NaiveDate>,
}

/// Contacts offered before the user has sent anything.
pub fn example_contacts() -> Vec<Contact> {
    vec![
        Contact {
            name: "Tom".into(),
            address: "0x0530f347bb9aad521c36d803f44957242dbf67cb52078609e3c3cfb5a82e9544".into(),
            amount: 2.4,
            last_used: NaiveDate::from_ymd_opt(2024, 1, 16),
        },
        Contact {
            name: "Alice".into(),
            address: "0x04a69af1ef2d19c4e7ef379f6ff4c1a36e78d10fd5c8f96f0ea41012052a8e7c".into(),
            amount: 1.8,
            last_used: NaiveDate::from_ymd_opt(2024, 1, 15),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiftModal {
    Success {
        message: String,
        explorer_url: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GiftPage {
    pub account: Option<AccountRecord>,
    pub show_private_key: bool,
    /// Second view: the "what is a wallet" gift form.
    pub show_gift_form: bool,
    pub contacts: Vec<Contact>,
    pub selected_contact: Option<Contact>,
    pub new_address: String,
    pub new_amount: String,
    pub custom_amount: String,
    pub is_valid_address: bool,
    pub is_loading: bool,
    pub tx_hash: Option<String>,
    pub modal: Option<GiftModal>,
    /// Prefix for transaction links.
    pub explorer_tx_url: String,
}

impl Default for GiftPage {
    fn default() -> Self {
        Self {
            account: None,
            show_private_key: false,
            show_gift_form: false,
            contacts: example_contacts(),
            selected_contact: None,
            new_address: String::new(),
            new_amount: String::new(),
            custom_amount: String::new(),
            is_valid_address: true,
            is_loading: false,
            tx_hash: None,
            modal: None,
            explorer_tx_url: DEFAULT_EXPLORER_TX_URL.to_string(),
        }
    }
}

impl GiftPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page whose links point at `explorer_tx_url`.
    pub fn with_explorer(explorer_tx_url: impl Into<String>) -> Self {
        Self {
            explorer_tx_url: explorer_tx_url.into(),
            ..Self::default()
        }
    }

    /// Load the account panel. Address and key come from the account
    /// details route; the funding transaction from the backend's public
    /// view. A details failure leaves the panel showing "Loading...".
    pub async fn load(&mut self, api: &dyn GiftApi) {
        let details = match api.account_details().await {
            Ok(details) => details,
            Err(e) => {
                error!(error = %e, "Error fetching account data");
                return;
            }
        };

        let funding_tx_hash = match api.backend_account().await {
            Ok(public) if public.address == details.address => public.funding_tx_hash,
            Ok(_) => {
                warn!("Backend account differs from stored account");
                None
            }
            Err(e) => {
                warn!(error = %e, "Funding transaction unavailable");
                None
            }
        };

        self.account = Some(AccountRecord {
            address: details.address,
            private_key: details.private_key,
            public_key: None,
            funding_tx_hash,
        });
    }

    pub fn address_label(&self) -> &str {
        self.account
            .as_ref()
            .map(|a| a.address.as_str())
            .unwrap_or(LOADING)
    }

    pub fn private_key_label(&self) -> &str {
        if !self.show_private_key {
            return HIDDEN_KEY;
        }
        self.account
            .as_ref()
            .map(|a| a.private_key.as_str())
            .unwrap_or(LOADING)
    }

    pub fn toggle_private_key(&mut self) {
        self.show_private_key = !self.show_private_key;
    }

    pub fn private_key_button_label(&self) -> &'static str {
        if self.show_private_key {
            "Hide Private Key 🫣"
        } else {
            "Reveal Private Key 👀"
        }
    }

    /// Explorer page of the account's funding transaction.
    pub fn funding_explorer_link(&self) -> String {
        let hash = self
            .account
            .as_ref()
            .and_then(|a| a.funding_tx_hash.as_ref())
            .and_then(Value::as_str)
            .unwrap_or_default();
        explorer_tx_link(&self.explorer_tx_url, hash)
    }

    pub fn open_gift_form(&mut self) {
        self.show_gift_form = true;
    }

    pub fn back(&mut self) {
        self.show_gift_form = false;
    }

    /// Recipient input changed; validity is re-evaluated on every edit.
    pub fn set_new_address(&mut self, input: &str) {
        self.new_address = input.to_string();
        self.is_valid_address = is_valid_recipient(input);
    }

    pub fn set_new_amount(&mut self, input: &str) {
        self.new_amount = input.to_string();
    }

    /// Shown only once something has been typed.
    pub fn address_error(&self) -> Option<&'static str> {
        (!self.is_valid_address && !self.new_address.is_empty()).then_some(INVALID_ADDRESS_MESSAGE)
    }

    pub fn can_send_to_new_address(&self) -> bool {
        self.is_valid_address
            && !self.new_address.is_empty()
            && !self.new_amount.is_empty()
            && !self.is_loading
    }

    pub fn send_button_label(&self) -> &'static str {
        if self.is_loading {
            "Sending Gift..."
        } else {
            "Send Gift 🎁"
        }
    }

    pub fn select_contact(&mut self, contact: Contact) {
        self.selected_contact = Some(contact);
    }

    /// Custom amount typed for the selected contact. Unparseable input is
    /// kept as text but does not change the contact's amount.
    pub fn set_custom_amount(&mut self, input: &str) {
        if let (Some(contact), Some(amount)) = (self.selected_contact.as_mut(), parse_float(input)) {
            contact.amount = amount;
        }
        self.custom_amount = input.to_string();
    }

    /// Gift to the typed recipient, resolving known Starknet IDs first.
    pub async fn send_to_new_address(&mut self, api: &dyn GiftApi) {
        if !self.can_send_to_new_address() {
            return;
        }
        let resolved = resolve_recipient(&self.new_address);
        // NaN is sent as JSON null.
        let amount = parse_float(&self.new_amount).unwrap_or(f64::NAN);

        self.is_loading = true;
        let result = api.send_gift(&resolved, amount).await;
        match result {
            Ok(body) => {
                self.selected_contact = Some(Contact {
                    name: recipient_label(&self.new_address),
                    address: resolved,
                    amount,
                    last_used: Some(Utc::now().date_naive()),
                });
                self.gift_sent(&body);
            }
            Err(e) => self.gift_failed(e.server_error().map(str::to_string), &e),
        }
        self.is_loading = false;
    }

    /// Gift to the selected contact with its current amount.
    pub async fn send_to_selected(&mut self, api: &dyn GiftApi) {
        let Some(contact) = self.selected_contact.clone() else {
            return;
        };
        if self.is_loading {
            return;
        }

        self.is_loading = true;
        match api.send_gift(&contact.address, contact.amount).await {
            Ok(body) => self.gift_sent(&body),
            Err(e) => self.gift_failed(e.server_error().map(str::to_string), &e),
        }
        self.is_loading = false;
    }

    fn gift_sent(&mut self, body: &Value) {
        let tx_hash = body
            .get("transaction_hash")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.modal = Some(GiftModal::Success {
            message: format!(
                "Your gift of {} STRK has been sent to {}",
                self.gift_amount_label(),
                self.recipient_display()
            ),
            explorer_url: explorer_tx_link(&self.explorer_tx_url, &tx_hash),
        });
        self.tx_hash = Some(tx_hash);
    }

    fn gift_failed(&mut self, message: Option<String>, cause: &ClientError) {
        error!(error = %cause, "Error sending gift");
        self.modal = Some(GiftModal::Error {
            message: message.unwrap_or_else(|| GIFT_FAILED_MESSAGE.to_string()),
        });
    }

    fn gift_amount_label(&self) -> String {
        match &self.selected_contact {
            Some(contact) => display_amount(contact.amount),
            None => self.new_amount.clone(),
        }
    }

    fn recipient_display(&self) -> String {
        match &self.selected_contact {
            Some(contact) => contact.name.clone(),
            None if self.new_address.ends_with(".stark") => self.new_address.clone(),
            None => shorten(&self.new_address),
        }
    }

    /// "About this Gift" line for the selected contact.
    pub fn gift_summary(&self) -> Option<String> {
        self.selected_contact.as_ref().map(|contact| {
            format!(
                "You're sending {} STRK to {}",
                display_amount(contact.amount),
                contact.name
            )
        })
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }
}
