// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet snapshot endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::ApiError, models::WalletResponse, state::AppState};

/// Query parameters for the wallet snapshot.
#[derive(Debug, Deserialize, IntoParams)]
pub struct WalletQuery {
    /// Wallet address (0x + 40 hex chars)
    pub address: Option<String>,
    /// Chain key; unknown or missing keys use the default chain
    pub chain: Option<String>,
}

/// Aggregate native balance, token balances, quotes and NFTs of a wallet.
#[utoipa::path(
    get,
    path = "/get-wallet",
    params(WalletQuery),
    tag = "Wallet",
    responses(
        (status = 200, description = "Wallet snapshot", body = WalletResponse),
        (status = 400, description = "Invalid address, or an upstream source failed")
    )
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    Query(query): Query<WalletQuery>,
) -> Result<Json<WalletResponse>, ApiError> {
    let address = query.address.unwrap_or_default();
    let chain = query.chain.unwrap_or_default();

    let snapshot = state
        .portfolio
        .get_wallet(&address, &chain)
        .await
        .map_err(|e| {
            tracing::warn!(
                %address,
                %chain,
                error_code = e.error_code(),
                error = %e,
                "Wallet snapshot failed"
            );
            ApiError::bad_request("invalid address or chain").with_code(e.error_code())
        })?;

    Ok(Json(snapshot.into()))
}
