// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Portfolio Aggregation
//!
//! Builds a [`WalletSnapshot`] for one address on one chain by joining four
//! independent sub-fetches:
//!
//! 1. Native balance (chain RPC)
//! 2. NFT holdings (marketplace API)
//! 3. Token balances: one unit of work per catalog token, each reading
//!    `balanceOf` + `decimals` and then the token's quote
//! 4. Native asset quote (market-data API)
//!
//! All sub-fetches run concurrently and are joined fail-fast: the first
//! failure aborts the request and no partial snapshot is produced. Sources
//! are not synchronised with each other, so the parts of a snapshot may
//! reflect slightly different points in time.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use futures::future::try_join_all;
use rust_decimal::Decimal;

use crate::chain::{
    erc20::read_balance,
    units::{normalize, WEI_DECIMALS},
    ChainReader, ChainRegistry, ResolvedChain, TokenCatalog, TokenDescriptor,
};
use crate::error::ServiceError;
use crate::market::{NftHolding, NftSource, Quote, QuoteSource};

/// Native currency balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBalance {
    pub wei: U256,
    /// `wei / 10^18`
    pub ether: Decimal,
}

/// One catalog token's balance joined with its quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub symbol: String,
    pub contract_address: Address,
    pub raw_balance: U256,
    /// Decimals read from the contract alongside `raw_balance`
    pub decimals: u8,
    /// `raw_balance / 10^decimals`
    pub balance: Decimal,
    pub quote: Quote,
}

/// Everything known about a wallet on one chain for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSnapshot {
    pub address: Address,
    pub chain_key: String,
    /// The requested chain key was unknown and the default chain was used
    pub resolved_via_fallback: bool,
    pub native: NativeBalance,
    pub native_quote: Quote,
    /// One entry per catalog token, in catalog order
    pub tokens: Vec<TokenBalance>,
    pub nfts: Vec<NftHolding>,
}

/// Orchestrates chain, market and NFT sources into wallet snapshots.
pub struct PortfolioAggregator {
    registry: Arc<ChainRegistry>,
    catalog: Arc<TokenCatalog>,
    quotes: Arc<dyn QuoteSource>,
    nfts: Arc<dyn NftSource>,
}

impl PortfolioAggregator {
    pub fn new(
        registry: Arc<ChainRegistry>,
        catalog: Arc<TokenCatalog>,
        quotes: Arc<dyn QuoteSource>,
        nfts: Arc<dyn NftSource>,
    ) -> Self {
        Self {
            registry,
            catalog,
            quotes,
            nfts,
        }
    }

    /// Build a snapshot of `address` on `chain_key`.
    ///
    /// The address is validated before any upstream call is made.
    pub async fn get_wallet(
        &self,
        address: &str,
        chain_key: &str,
    ) -> Result<WalletSnapshot, ServiceError> {
        let owner = ServiceError::parse_address(address)?;
        let chain = self.registry.resolve(chain_key);

        tracing::debug!(
            %owner,
            chain = %chain.key(),
            fallback = chain.via_fallback,
            "Building wallet snapshot"
        );

        let (native, nfts, tokens, native_quote) = tokio::try_join!(
            self.native_balance(chain.reader.as_ref(), owner),
            self.nft_holdings(owner, chain.descriptor.is_test_network),
            self.token_balances(&chain, owner),
            self.quote(&chain.descriptor.native_symbol),
        )?;

        Ok(WalletSnapshot {
            address: owner,
            chain_key: chain.key().to_string(),
            resolved_via_fallback: chain.via_fallback,
            native,
            native_quote,
            tokens,
            nfts,
        })
    }

    async fn native_balance(
        &self,
        reader: &dyn ChainReader,
        owner: Address,
    ) -> Result<NativeBalance, ServiceError> {
        let wei = reader
            .native_balance(owner)
            .await
            .map_err(|e| ServiceError::UpstreamFailure(format!("native balance: {e}")))?;

        let ether = normalize(wei, WEI_DECIMALS).ok_or_else(|| {
            ServiceError::UpstreamFailure(format!("native balance {wei} out of range"))
        })?;

        Ok(NativeBalance { wei, ether })
    }

    async fn nft_holdings(
        &self,
        owner: Address,
        is_test_network: bool,
    ) -> Result<Vec<NftHolding>, ServiceError> {
        self.nfts
            .holdings(&owner.to_string(), is_test_network)
            .await
            .map_err(|e| ServiceError::NftProviderFailure(e.to_string()))
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, ServiceError> {
        self.quotes
            .quote(symbol)
            .await
            .map_err(|e| ServiceError::QuoteUnavailable {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })
    }

    async fn token_balances(
        &self,
        chain: &ResolvedChain,
        owner: Address,
    ) -> Result<Vec<TokenBalance>, ServiceError> {
        let tokens = self.catalog.tokens_for(chain.key());
        try_join_all(
            tokens
                .iter()
                .map(|token| self.token_balance(chain.reader.as_ref(), token, owner)),
        )
        .await
    }

    async fn token_balance(
        &self,
        reader: &dyn ChainReader,
        token: &TokenDescriptor,
        owner: Address,
    ) -> Result<TokenBalance, ServiceError> {
        let raw = read_balance(reader, token, owner).await?;
        let quote = self.quote(&token.symbol).await?;

        let balance =
            normalize(raw.raw, raw.decimals).ok_or_else(|| ServiceError::ContractCallFailure {
                symbol: token.symbol.clone(),
                reason: format!("balance {} out of range", raw.raw),
            })?;

        Ok(TokenBalance {
            symbol: token.symbol.clone(),
            contract_address: token.contract_address,
            raw_balance: raw.raw,
            decimals: raw.decimals,
            balance,
            quote,
        })
    }
}
