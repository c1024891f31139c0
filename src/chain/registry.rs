// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain key to RPC endpoint resolution.
//!
//! The registry is built once at startup and shared read-only by every
//! request. Resolution never fails: an unknown key resolves to the default
//! chain, and the result records that the fallback was taken.

use std::{collections::HashMap, sync::Arc};

use url::Url;

use super::client::{ChainReader, EvmClient};

/// Chain key used when none is configured.
pub const DEFAULT_CHAIN_KEY: &str = "arbitrum_sepolia";

/// Static description of a supported chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDescriptor {
    /// Lookup key (e.g. "mainnet", "sepolia")
    pub key: String,
    /// JSON-RPC endpoint
    pub rpc_endpoint: Url,
    /// Whether this chain is a test network
    pub is_test_network: bool,
    /// Symbol of the native currency, used for the native quote
    pub native_symbol: String,
}

/// Outcome of resolving a chain key.
#[derive(Clone)]
pub struct ResolvedChain {
    pub descriptor: Arc<ChainDescriptor>,
    pub reader: Arc<dyn ChainReader>,
    /// True when the requested key was unknown and the default was used.
    pub via_fallback: bool,
}

impl ResolvedChain {
    pub fn key(&self) -> &str {
        &self.descriptor.key
    }
}

#[derive(Clone)]
struct ChainEntry {
    descriptor: Arc<ChainDescriptor>,
    reader: Arc<dyn ChainReader>,
}

/// Registry of configured chains.
pub struct ChainRegistry {
    chains: HashMap<String, ChainEntry>,
    default_key: String,
}

impl ChainRegistry {
    /// Build a registry from descriptors and their readers.
    ///
    /// Fails if `default_key` is not among the registered chains, so that
    /// [`ChainRegistry::resolve`] can never fail afterwards.
    pub fn new(
        entries: Vec<(ChainDescriptor, Arc<dyn ChainReader>)>,
        default_key: &str,
    ) -> Result<Self, RegistryError> {
        let mut chains = HashMap::with_capacity(entries.len());
        for (descriptor, reader) in entries {
            let key = descriptor.key.clone();
            let entry = ChainEntry {
                descriptor: Arc::new(descriptor),
                reader,
            };
            if chains.insert(key.clone(), entry).is_some() {
                return Err(RegistryError::DuplicateChain(key));
            }
        }

        if !chains.contains_key(default_key) {
            return Err(RegistryError::MissingDefault(default_key.to_string()));
        }

        Ok(Self {
            chains,
            default_key: default_key.to_string(),
        })
    }

    /// Build a registry with one alloy HTTP client per descriptor.
    pub fn connect(
        descriptors: &[ChainDescriptor],
        default_key: &str,
    ) -> Result<Self, RegistryError> {
        let entries = descriptors
            .iter()
            .map(|descriptor| {
                let reader: Arc<dyn ChainReader> =
                    Arc::new(EvmClient::new(descriptor.rpc_endpoint.clone()));
                (descriptor.clone(), reader)
            })
            .collect();
        Self::new(entries, default_key)
    }

    /// Resolve a chain key, falling back to the default chain when unknown.
    pub fn resolve(&self, chain_key: &str) -> ResolvedChain {
        if let Some(entry) = self.chains.get(chain_key.trim()) {
            return ResolvedChain {
                descriptor: entry.descriptor.clone(),
                reader: entry.reader.clone(),
                via_fallback: false,
            };
        }

        tracing::warn!(
            requested = %chain_key,
            fallback = %self.default_key,
            "Unknown chain key, using default chain"
        );

        let entry = &self.chains[&self.default_key];
        ResolvedChain {
            descriptor: entry.descriptor.clone(),
            reader: entry.reader.clone(),
            via_fallback: true,
        }
    }

    /// Key of the default chain.
    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Registered chain keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.chains.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Default chain `{0}` is not configured")]
    MissingDefault(String),

    #[error("Chain `{0}` is configured more than once")]
    DuplicateChain(String),
}
