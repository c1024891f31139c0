// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory fakes for the chain, quote and NFT seams.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use alloy::primitives::{keccak256, Address, U256};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use url::Url;

use crate::chain::{
    ChainDescriptor, ChainError, ChainReader, ChainRegistry, DEFAULT_CHAIN_KEY,
};
use crate::market::{MarketError, NftHolding, NftSource, Quote, QuoteSource};

pub fn descriptor(key: &str, is_test_network: bool) -> ChainDescriptor {
    ChainDescriptor {
        key: key.to_string(),
        rpc_endpoint: Url::parse(&format!("http://{key}.rpc.invalid")).unwrap(),
        is_test_network,
        native_symbol: "ETH".to_string(),
    }
}

/// Registry with `mainnet`, `sepolia` and the default chain, all backed by `chain`.
pub fn registry_with(chain: FakeChain) -> ChainRegistry {
    let reader: Arc<dyn ChainReader> = Arc::new(chain);
    ChainRegistry::new(
        vec![
            (descriptor("mainnet", false), reader.clone()),
            (descriptor("sepolia", true), reader.clone()),
            (descriptor(DEFAULT_CHAIN_KEY, true), reader),
        ],
        DEFAULT_CHAIN_KEY,
    )
    .unwrap()
}

pub fn quote(price: i64, change: i64) -> Quote {
    Quote {
        price_usd: Decimal::from(price),
        percent_change_24h: Decimal::from(change),
    }
}

pub fn holding(identifier: &str) -> NftHolding {
    serde_json::from_value(json!({
        "identifier": identifier,
        "contract": "0x0000000000000000000000000000000000000abc",
        "name": format!("Token #{identifier}")
    }))
    .unwrap()
}

#[derive(Default)]
pub struct FakeChain {
    native: HashMap<Address, U256>,
    tokens: HashMap<(Address, Address), (U256, u8)>,
    gas_price: Option<u128>,
    nonces: HashMap<Address, u64>,
    fail_native: bool,
    broadcasts: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl FakeChain {
    pub fn with_native(mut self, owner: Address, wei: U256) -> Self {
        self.native.insert(owner, wei);
        self
    }

    pub fn with_token(mut self, contract: Address, owner: Address, raw: U256, decimals: u8) -> Self {
        self.tokens.insert((contract, owner), (raw, decimals));
        self
    }

    pub fn with_gas_price(mut self, wei: u128) -> Self {
        self.gas_price = Some(wei);
        self
    }

    pub fn with_nonce(mut self, owner: Address, nonce: u64) -> Self {
        self.nonces.insert(owner, nonce);
        self
    }

    pub fn failing_native(mut self) -> Self {
        self.fail_native = true;
        self
    }

    pub fn broadcasts(&self) -> Arc<Mutex<Vec<Vec<u8>>>> {
        self.broadcasts.clone()
    }
}

#[async_trait]
impl ChainReader for FakeChain {
    async fn native_balance(&self, owner: Address) -> Result<U256, ChainError> {
        if self.fail_native {
            return Err(ChainError::RpcError("connection refused".to_string()));
        }
        Ok(self.native.get(&owner).copied().unwrap_or_default())
    }

    async fn erc20_balance(
        &self,
        contract: Address,
        owner: Address,
    ) -> Result<(U256, u8), ChainError> {
        self.tokens
            .get(&(contract, owner))
            .copied()
            .ok_or_else(|| ChainError::ContractError("execution reverted".to_string()))
    }

    async fn gas_price(&self) -> Result<u128, ChainError> {
        self.gas_price
            .ok_or_else(|| ChainError::RpcError("eth_gasPrice unavailable".to_string()))
    }

    async fn transaction_count(&self, owner: Address) -> Result<u64, ChainError> {
        self.nonces
            .get(&owner)
            .copied()
            .ok_or_else(|| ChainError::RpcError("eth_getTransactionCount failed".to_string()))
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<String, ChainError> {
        if raw.is_empty() {
            return Err(ChainError::TransactionFailed("empty transaction".to_string()));
        }
        self.broadcasts.lock().unwrap().push(raw.to_vec());
        Ok(keccak256(raw).to_string())
    }
}

#[derive(Default)]
pub struct FakeQuotes {
    quotes: HashMap<String, Quote>,
    calls: Arc<AtomicUsize>,
}

impl FakeQuotes {
    pub fn with_quote(mut self, symbol: &str, quote: Quote) -> Self {
        self.quotes.insert(symbol.to_string(), quote);
        self
    }

    pub fn call_count(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl QuoteSource for FakeQuotes {
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.quotes
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketError::MissingSymbol(symbol.to_string()))
    }
}

#[derive(Default)]
pub struct FakeNfts {
    holdings: Vec<NftHolding>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<(String, bool)>>>,
}

impl FakeNfts {
    pub fn with_holdings(mut self, holdings: Vec<NftHolding>) -> Self {
        self.holdings = holdings;
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Recorded `(owner, is_test_network)` arguments.
    pub fn calls(&self) -> Arc<Mutex<Vec<(String, bool)>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl NftSource for FakeNfts {
    async fn holdings(
        &self,
        owner: &str,
        is_test_network: bool,
    ) -> Result<Vec<NftHolding>, MarketError> {
        self.calls
            .lock()
            .unwrap()
            .push((owner.to_string(), is_test_network));

        match &self.failure {
            Some(message) => Err(MarketError::Status {
                status: 503,
                body: message.clone(),
            }),
            None => Ok(self.holdings.clone()),
        }
    }
}
