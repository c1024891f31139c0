// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::str::FromStr;

use alloy::primitives::Address;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures of the portfolio and gas core.
///
/// Every sub-fetch failure is fatal to the request that issued it.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Contract call failed for {symbol}: {reason}")]
    ContractCallFailure { symbol: String, reason: String },

    #[error("Quote unavailable for {symbol}: {reason}")]
    QuoteUnavailable { symbol: String, reason: String },

    #[error("NFT provider failure: {0}")]
    NftProviderFailure(String),

    #[error("Gas query failed: {0}")]
    GasQueryFailure(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Invalid signed transaction: {0}")]
    InvalidTransaction(String),

    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),
}

impl ServiceError {
    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::InvalidAddress(_) => "invalid_address",
            ServiceError::ContractCallFailure { .. } => "contract_call_failure",
            ServiceError::QuoteUnavailable { .. } => "quote_unavailable",
            ServiceError::NftProviderFailure(_) => "nft_provider_failure",
            ServiceError::GasQueryFailure(_) => "gas_query_failure",
            ServiceError::UpstreamFailure(_) => "upstream_failure",
            ServiceError::InvalidTransaction(_) => "invalid_transaction",
            ServiceError::TransactionRejected(_) => "transaction_rejected",
        }
    }

    /// Parse a 0x-prefixed, 20-byte hex address.
    pub fn parse_address(raw: &str) -> Result<Address, ServiceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidAddress("address is required".to_string()));
        }
        Address::from_str(trimmed).map_err(|e| ServiceError::InvalidAddress(format!("{trimmed}: {e}")))
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Attach a machine-readable error code to the response body.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

/// Code attached to bodies and query strings the extractors could not parse.
pub const INVALID_REQUEST_CODE: &str = "invalid_request";

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text()).with_code(INVALID_REQUEST_CODE)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text()).with_code(INVALID_REQUEST_CODE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.code,
        });
        (self.status, body).into_response()
    }
}
