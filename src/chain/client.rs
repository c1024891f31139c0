// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM JSON-RPC client used for balance, gas and broadcast calls.

use alloy::{
    network::Ethereum,
    primitives::{Address, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};
use async_trait::async_trait;
use url::Url;

use super::erc20::Erc20Contract;

/// HTTP provider type for an EVM chain (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Read-mostly view of one chain's RPC endpoint.
///
/// Implementations are shared across concurrent requests and must not hold
/// per-request state.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Native currency balance of `owner`, in wei.
    async fn native_balance(&self, owner: Address) -> Result<U256, ChainError>;

    /// ERC-20 `balanceOf(owner)` together with the contract's live `decimals()`.
    async fn erc20_balance(
        &self,
        contract: Address,
        owner: Address,
    ) -> Result<(U256, u8), ChainError>;

    /// Current gas price, in wei.
    async fn gas_price(&self) -> Result<u128, ChainError>;

    /// Number of transactions sent from `owner` (its next nonce).
    async fn transaction_count(&self, owner: Address) -> Result<u64, ChainError>;

    /// Submit an already-signed raw transaction and return its hash.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<String, ChainError>;
}

/// EVM chain client backed by an alloy HTTP provider.
pub struct EvmClient {
    provider: HttpProvider,
}

impl EvmClient {
    /// Create a client for the given RPC endpoint. No connection is made
    /// until the first call.
    pub fn new(rpc_endpoint: Url) -> Self {
        let provider = ProviderBuilder::new().connect_http(rpc_endpoint);
        Self { provider }
    }
}

#[async_trait]
impl ChainReader for EvmClient {
    async fn native_balance(&self, owner: Address) -> Result<U256, ChainError> {
        self.provider
            .get_balance(owner)
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))
    }

    async fn erc20_balance(
        &self,
        contract: Address,
        owner: Address,
    ) -> Result<(U256, u8), ChainError> {
        Erc20Contract::new(&self.provider, contract)
            .balance_with_decimals(owner)
            .await
    }

    async fn gas_price(&self) -> Result<u128, ChainError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))
    }

    async fn transaction_count(&self, owner: Address) -> Result<u64, ChainError> {
        self.provider
            .get_transaction_count(owner)
            .await
            .map_err(|e| ChainError::RpcError(e.to_string()))
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<String, ChainError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| ChainError::TransactionFailed(e.to_string()))?;

        Ok(pending.tx_hash().to_string())
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
