// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    chain::{AccountBalances, StakedAmount, TokenBalance, TransferEvent, TransferHistory},
    models::{
        AccountDetails, CreatePaymentIntentRequest, CreatePaymentIntentResponse,
        ExecuteTransferRequest, ExecuteTransferResponse, PaymentConfigResponse, SendGiftRequest,
        PublicAccount, StakeRequest, StakeResponse, UsdQuote,
    },
    state::AppState,
};

pub mod account;
pub mod chain;
pub mod health;
pub mod payments;
pub mod price;
pub mod stake;
pub mod transfer;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/create-payment-intent",
            post(payments::create_payment_intent),
        )
        .route("/payment-config", get(payments::payment_config))
        .route("/execute-transfer", post(transfer::execute_transfer))
        .route("/send-gift", post(transfer::send_gift))
        .route("/stake", post(stake::stake))
        .route("/get-account-details", get(account::get_account_details))
        .route("/create-deploy", post(account::create_deploy))
        .route("/account", get(account::backend_account))
        .route("/price/{symbol}", get(price::token_price))
        .route("/balance/{address}", get(chain::balances))
        .route("/transfers/{address}", get(chain::transfers))
        .route("/staked/{address}", get(chain::staked));

    let app = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    app.merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        payments::create_payment_intent,
        payments::payment_config,
        transfer::execute_transfer,
        transfer::send_gift,
        stake::stake,
        account::get_account_details,
        account::create_deploy,
        account::backend_account,
        price::token_price,
        chain::balances,
        chain::transfers,
        chain::staked,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            AccountDetails,
            PublicAccount,
            CreatePaymentIntentRequest,
            CreatePaymentIntentResponse,
            PaymentConfigResponse,
            ExecuteTransferRequest,
            ExecuteTransferResponse,
            SendGiftRequest,
            StakeRequest,
            StakeResponse,
            UsdQuote,
            AccountBalances,
            TokenBalance,
            TransferEvent,
            TransferHistory,
            StakedAmount,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Payments", description = "Card payments"),
        (name = "Transfers", description = "STRK delivery and gifts"),
        (name = "Staking", description = "Delegation staking"),
        (name = "Account", description = "Account creation and lookup"),
        (name = "Quotes", description = "Token prices"),
        (name = "Chain", description = "Read-only Starknet queries"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
