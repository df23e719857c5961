// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::warn;

use crate::{
    error::ApiError,
    models::UsdQuote,
    providers::PriceError,
    state::AppState,
};

/// USD price of a token, shaped like the quote source's own answer
/// (`{"starknet": {"usd": 0.39}}`).
#[utoipa::path(
    get,
    path = "/api/price/{symbol}",
    params(("symbol" = String, Path, description = "Token symbol: STRK or ETH")),
    tag = "Quotes",
    responses(
        (status = 200, body = HashMap<String, UsdQuote>),
        (status = 400, description = "Unsupported symbol"),
        (status = 502, description = "Quote source unavailable")
    )
)]
pub async fn token_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<HashMap<String, UsdQuote>>, ApiError> {
    let quote = state.prices.usd_price(&symbol).await.map_err(|e| match e {
        PriceError::UnsupportedSymbol(_) => ApiError::bad_request(e.to_string()),
        other => {
            warn!(error = %other, %symbol, "Price fetch failed");
            ApiError::bad_gateway(other.to_string())
        }
    })?;

    Ok(Json(HashMap::from([(
        quote.id.to_string(),
        UsdQuote { usd: quote.usd },
    )])))
}
