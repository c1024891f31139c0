// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static per-chain token catalog.
//!
//! Tokens are not discovered dynamically: every chain key maps to a fixed
//! list of contracts that is queried for each wallet request.

use std::collections::HashMap;

use alloy::primitives::{address, Address};

/// Contract interface used to read a token's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAbi {
    Erc20,
}

/// A token tracked on one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDescriptor {
    /// Ticker used for market quotes (e.g. "USDC")
    pub symbol: String,
    /// Token contract address
    pub contract_address: Address,
    /// Decimals as published at configuration time. Informational only;
    /// normalisation always uses the value read from the contract.
    pub decimals_hint: Option<u8>,
    pub abi: TokenAbi,
}

impl TokenDescriptor {
    pub fn erc20(symbol: &str, contract_address: Address, decimals_hint: Option<u8>) -> Self {
        Self {
            symbol: symbol.to_string(),
            contract_address,
            decimals_hint,
            abi: TokenAbi::Erc20,
        }
    }
}

/// Circle USDC on Ethereum mainnet.
pub const USDC_MAINNET: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// USDC test token on Sepolia.
pub const USDC_SEPOLIA: Address = address!("0x94a9D9AC8a22534E3FaCa9F4e7F2E2cf85d5E4C8");

/// Circle native USDC on Arbitrum One.
pub const USDC_ARBITRUM_MAINNET: Address = address!("0xaf88d065e77c8cC2239327C5EDb3A432268e5831");

/// Circle USDC test token on Arbitrum Sepolia.
pub const USDC_ARBITRUM_SEPOLIA: Address = address!("0x75faf114eafb1BDbe2F0316DF893fd58CE46AA4d");

/// Token lists keyed by chain key.
#[derive(Debug, Clone, Default)]
pub struct TokenCatalog {
    by_chain: HashMap<String, Vec<TokenDescriptor>>,
}

impl TokenCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token list for a chain, replacing any previous list.
    pub fn with_chain(mut self, chain_key: &str, tokens: Vec<TokenDescriptor>) -> Self {
        self.by_chain.insert(chain_key.to_string(), tokens);
        self
    }

    /// Catalog shipped with the service.
    pub fn builtin() -> Self {
        Self::new()
            .with_chain(
                "mainnet",
                vec![TokenDescriptor::erc20("USDC", USDC_MAINNET, Some(6))],
            )
            .with_chain(
                "sepolia",
                vec![TokenDescriptor::erc20("USDC", USDC_SEPOLIA, None)],
            )
            .with_chain(
                "arbitrum_mainnet",
                vec![TokenDescriptor::erc20("USDC", USDC_ARBITRUM_MAINNET, Some(6))],
            )
            .with_chain(
                "arbitrum_sepolia",
                vec![TokenDescriptor::erc20("USDC", USDC_ARBITRUM_SEPOLIA, None)],
            )
    }

    /// Tokens configured for `chain_key`; empty if the chain has none.
    pub fn tokens_for(&self, chain_key: &str) -> &[TokenDescriptor] {
        self.by_chain
            .get(chain_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
