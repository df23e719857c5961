// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Card checkout for STRK.
//!
//! The estimate shown to the buyer uses the live quote, while the amount
//! actually transferred after payment uses [`TRANSFER_RATE`]. The two are
//! not reconciled: 10 USD at $0.39 shows ~25.64 STRK and sends 25.4.

use async_trait::async_trait;
use tracing::{error, warn};

use super::{api_client::GiftApi, display_amount, parse_number};

/// STRK sent per USD paid.
pub const TRANSFER_RATE: f64 = 2.54;

pub const DEFAULT_AMOUNT_USD: f64 = 10.0;

pub const QUOTE_SYMBOL: &str = "STRK";

/// Where the success modal leads.
pub const SUCCESS_ROUTE: &str = "/gift";

pub const NOT_READY_MESSAGE: &str = "Payment not ready. Please try again.";
pub const PAYMENT_FAILED_MESSAGE: &str = "Payment failed";
pub const TRANSFER_FAILED_MESSAGE: &str = "Payment succeeded but token transfer failed";

/// Result of handing the client secret to the hosted payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Succeeded { payment_id: String },
    /// Declined or rejected, with the processor's text when it gave one.
    Failed { message: Option<String> },
    /// Any other intent status, e.g. `processing`. Nothing else happens.
    Incomplete { status: String },
}

/// The hosted widget that collects card details and confirms the intent.
#[async_trait]
pub trait PaymentConfirmer: Send + Sync {
    async fn confirm(&self, client_secret: &str) -> ConfirmOutcome;
}

/// Contents of the success modal.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub amount_usd: f64,
    pub strk_amount: f64,
}

impl PaymentReceipt {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Transaction ID: {}", self.transaction_id),
            format!("Amount: ${}", display_amount(self.amount_usd)),
            format!("STRK Amount: {}", display_amount(self.strk_amount)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub amount_usd: f64,
    pub token_price: f64,
    pub token_amount: f64,
    pub client_secret: Option<String>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub receipt: Option<PaymentReceipt>,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            amount_usd: DEFAULT_AMOUNT_USD,
            token_price: 0.0,
            token_amount: 0.0,
            client_secret: None,
            is_loading: false,
            error_message: None,
            receipt: None,
        }
    }
}

/// `round(usd * 100)`.
pub fn intent_amount_cents(amount_usd: f64) -> u64 {
    (amount_usd * 100.0).round().max(0.0) as u64
}

pub fn transfer_amount(amount_usd: f64) -> f64 {
    amount_usd * TRANSFER_RATE
}

impl PaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the quote and a client secret for the current amount.
    pub async fn load(&mut self, api: &dyn GiftApi) {
        self.refresh_quote(api).await;
        self.refresh_intent(api).await;
    }

    /// Amount input changed. An empty or unparseable input counts as zero.
    pub async fn set_amount(&mut self, api: &dyn GiftApi, input: &str) {
        self.amount_usd = parse_number(input).unwrap_or(0.0);
        self.load(api).await;
    }

    async fn refresh_quote(&mut self, api: &dyn GiftApi) {
        match api.token_price(QUOTE_SYMBOL).await {
            Ok(price) => {
                self.token_price = price;
                self.token_amount = self.amount_usd / price;
            }
            Err(e) => warn!(error = %e, "Error fetching price"),
        }
    }

    /// Every amount change creates a new intent.
    async fn refresh_intent(&mut self, api: &dyn GiftApi) {
        if self.amount_usd <= 0.0 {
            return;
        }
        match api
            .create_payment_intent(intent_amount_cents(self.amount_usd))
            .await
        {
            Ok(secret) => self.client_secret = secret,
            Err(e) if e.server_error().is_some() => self.client_secret = None,
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    pub fn estimate_label(&self) -> String {
        let mut label = format!(
            "You will receive approximately {:.2} STRK",
            self.token_amount
        );
        if self.token_price > 0.0 {
            label.push_str(&format!(" (1 STRK = ${:.2})", self.token_price));
        }
        label
    }

    pub fn button_label(&self) -> String {
        if self.client_secret.is_none() {
            "Loading...".to_string()
        } else if self.is_loading {
            "Processing...".to_string()
        } else {
            format!("Pay ${}", display_amount(self.amount_usd))
        }
    }

    pub fn can_submit(&self, widget_ready: bool) -> bool {
        widget_ready && !self.is_loading && self.client_secret.is_some()
    }

    /// Confirm the payment and, once it succeeds, request the transfer.
    ///
    /// `confirmer` is `None` while the hosted widget is still loading.
    pub async fn submit(&mut self, api: &dyn GiftApi, confirmer: Option<&dyn PaymentConfirmer>) {
        let (Some(confirmer), Some(secret)) = (confirmer, self.client_secret.clone()) else {
            self.error_message = Some(NOT_READY_MESSAGE.to_string());
            return;
        };

        self.is_loading = true;
        match confirmer.confirm(&secret).await {
            ConfirmOutcome::Failed { message } => {
                self.error_message =
                    Some(message.unwrap_or_else(|| PAYMENT_FAILED_MESSAGE.to_string()));
            }
            ConfirmOutcome::Succeeded { payment_id } => {
                let strk_amount = transfer_amount(self.amount_usd);
                match api.execute_transfer(strk_amount).await {
                    Ok(_) => {
                        self.receipt = Some(PaymentReceipt {
                            transaction_id: payment_id,
                            amount_usd: self.amount_usd,
                            strk_amount,
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "Transfer error");
                        self.error_message = Some(TRANSFER_FAILED_MESSAGE.to_string());
                    }
                }
            }
            ConfirmOutcome::Incomplete { status } => {
                warn!(%status, "Payment not completed");
            }
        }
        self.is_loading = false;
    }

    /// Close the success modal; returns the route to open.
    pub fn view_gift(&mut self) -> &'static str {
        self.receipt = None;
        SUCCESS_ROUTE
    }
}
