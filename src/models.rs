// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. Field names follow the
//! wire format existing wallet clients already consume (`percent_change`,
//! `gasPriceWei`, `signedTxn`, ...).
//!
//! Decimal amounts are serialized as JSON numbers; wei amounts as decimal
//! strings so that no precision is lost.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::chain::GasEstimate;
use crate::market::NftHolding;
use crate::portfolio::{TokenBalance, WalletSnapshot};

// =============================================================================
// Wallet Snapshot
// =============================================================================

/// Token balance with its USD quote.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenBalanceView {
    /// Token symbol (e.g. "USDC")
    pub symbol: String,
    /// Token contract address
    pub contract_address: String,
    /// Balance normalised by the contract's decimals
    #[schema(value_type = f64)]
    pub balance: Decimal,
    /// Balance in the token's smallest unit
    pub balance_raw: String,
    /// Decimals read from the contract
    pub decimals: u8,
    /// USD price
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// 24h price change in percent
    #[schema(value_type = f64)]
    pub percent_change: Decimal,
}

impl From<TokenBalance> for TokenBalanceView {
    fn from(token: TokenBalance) -> Self {
        Self {
            symbol: token.symbol,
            contract_address: token.contract_address.to_string(),
            balance: token.balance,
            balance_raw: token.raw_balance.to_string(),
            decimals: token.decimals,
            price: token.quote.price_usd,
            percent_change: token.quote.percent_change_24h,
        }
    }
}

/// Wallet snapshot response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WalletResponse {
    /// Wallet address (checksummed)
    pub address: String,
    /// Chain the snapshot was taken on
    pub chain: String,
    /// True when the requested chain was unknown and the default chain was used
    pub fallback: bool,
    /// Native balance in ether
    #[schema(value_type = f64)]
    pub balance: Decimal,
    /// Native balance in wei
    pub balance_wei: String,
    /// Native asset USD price
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// Native asset 24h price change in percent
    #[schema(value_type = f64)]
    pub percent_change: Decimal,
    /// NFTs as returned by the marketplace
    #[schema(value_type = Vec<Object>)]
    pub nfts: Vec<NftHolding>,
    /// Configured token balances
    pub tokens: Vec<TokenBalanceView>,
}

impl From<WalletSnapshot> for WalletResponse {
    fn from(snapshot: WalletSnapshot) -> Self {
        Self {
            address: snapshot.address.to_string(),
            chain: snapshot.chain_key,
            fallback: snapshot.resolved_via_fallback,
            balance: snapshot.native.ether,
            balance_wei: snapshot.native.wei.to_string(),
            price: snapshot.native_quote.price_usd,
            percent_change: snapshot.native_quote.percent_change_24h,
            nfts: snapshot.nfts,
            tokens: snapshot.tokens.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Gas
// =============================================================================

/// Gas price and transfer fee estimate.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceResponse {
    /// Gas price in wei
    pub gas_price_wei: String,
    /// Gas price in gwei
    pub gas_price_gwei: String,
    /// Fee of a 21000-gas transfer, in wei
    pub estimated_fee_wei: String,
    /// Next nonce of `walletAddress`, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
}

impl From<GasEstimate> for GasPriceResponse {
    fn from(estimate: GasEstimate) -> Self {
        Self {
            gas_price_wei: estimate.gas_price_wei.to_string(),
            gas_price_gwei: estimate.gas_price_gwei.to_string(),
            estimated_fee_wei: estimate.estimated_fee_wei.to_string(),
            nonce: estimate.nonce,
        }
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// Broadcast request for an already-signed transaction.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest {
    /// Chain key; unknown or missing keys use the default chain
    pub chain: Option<String>,
    /// RLP-encoded signed transaction, hex (0x-prefixed or bare)
    #[serde(default)]
    pub signed_txn: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResponse {
    pub transaction_hash: String,
}

// =============================================================================
// Session Data
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDataRequest {
    #[serde(default)]
    pub session_id: String,
    /// Arbitrary JSON payload
    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: Value,
}

/// Stored session record.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub id: String,
    pub session_id: String,
    #[schema(value_type = Object)]
    pub data: Value,
    pub created_at: DateTime<Utc>,
}
