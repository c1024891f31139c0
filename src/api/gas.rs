// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{chain::gas, error::ApiError, models::GasPriceResponse, state::AppState};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct GasPriceQuery {
    /// Chain key; unknown or missing keys use the default chain
    pub chain: Option<String>,
    /// When present, the response includes this address's next nonce
    pub wallet_address: Option<String>,
}

/// Current gas price and the fee of a plain transfer.
#[utoipa::path(
    get,
    path = "/get-gas-price",
    params(GasPriceQuery),
    tag = "Gas",
    responses(
        (status = 200, description = "Gas estimate", body = GasPriceResponse),
        (status = 400, description = "Gas price could not be fetched")
    )
)]
pub async fn get_gas_price(
    State(state): State<AppState>,
    Query(query): Query<GasPriceQuery>,
) -> Result<Json<GasPriceResponse>, ApiError> {
    let chain = state.registry.resolve(query.chain.as_deref().unwrap_or_default());
    let address = query
        .wallet_address
        .as_deref()
        .filter(|a| !a.trim().is_empty());

    let estimate = gas::estimate(chain.reader.as_ref(), address)
        .await
        .map_err(|e| {
            tracing::warn!(
                chain = %chain.key(),
                error_code = e.error_code(),
                error = %e,
                "Gas estimate failed"
            );
            ApiError::bad_request("Error while fetching gas price").with_code(e.error_code())
        })?;

    Ok(Json(estimate.into()))
}
