// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Broadcast of client-signed transactions.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    error::{ApiError, ServiceError},
    models::{SendTransactionRequest, SendTransactionResponse},
    state::AppState,
};

/// Submit a signed raw transaction to the chain.
///
/// The transaction is forwarded as-is; the server never holds keys.
#[utoipa::path(
    post,
    path = "/send-transaction",
    request_body = SendTransactionRequest,
    tag = "Transactions",
    responses(
        (status = 200, description = "Transaction accepted by the node", body = SendTransactionResponse),
        (status = 400, description = "Malformed or rejected transaction")
    )
)]
pub async fn send_transaction(
    State(state): State<AppState>,
    payload: Result<Json<SendTransactionRequest>, JsonRejection>,
) -> Result<Json<SendTransactionResponse>, ApiError> {
    let Json(request) = payload?;
    let chain = state.registry.resolve(request.chain.as_deref().unwrap_or_default());

    let raw = decode_signed_txn(request.signed_txn.as_deref()).map_err(|e| to_api_error(chain.key(), e))?;

    let transaction_hash = chain
        .reader
        .send_raw_transaction(&raw)
        .await
        .map_err(|e| to_api_error(chain.key(), ServiceError::TransactionRejected(e.to_string())))?;

    tracing::info!(chain = %chain.key(), tx_hash = %transaction_hash, "Transaction broadcast");

    Ok(Json(SendTransactionResponse { transaction_hash }))
}

fn decode_signed_txn(signed_txn: Option<&str>) -> Result<Vec<u8>, ServiceError> {
    let trimmed = signed_txn.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidTransaction("signedTxn is required".to_string()));
    }
    alloy::primitives::hex::decode(trimmed).map_err(|e| ServiceError::InvalidTransaction(e.to_string()))
}

fn to_api_error(chain: &str, err: ServiceError) -> ApiError {
    tracing::warn!(%chain, error_code = err.error_code(), error = %err, "Broadcast failed");
    ApiError::bad_request(err.to_string()).with_code(err.error_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_prefixed_and_bare_hex() {
        assert_eq!(decode_signed_txn(Some("0x02f8")).unwrap(), vec![0x02, 0xf8]);
        assert_eq!(decode_signed_txn(Some("02f8")).unwrap(), vec![0x02, 0xf8]);
    }

    #[test]
    fn rejects_empty_and_malformed_hex() {
        for raw in [None, Some(""), Some("  "), Some("0xzz"), Some("0x123")] {
            let err = decode_signed_txn(raw).unwrap_err();
            assert_eq!(err.error_code(), "invalid_transaction", "input {raw:?}");
        }
    }
}
