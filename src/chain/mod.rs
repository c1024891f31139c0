// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM chain integration.
//!
//! This module provides:
//! - Chain key resolution (`registry`)
//! - The static token catalog (`tokens`)
//! - Native and ERC-20 balance reads (`client`, `erc20`)
//! - Transfer fee estimation (`gas`)

pub mod client;
pub mod erc20;
pub mod gas;
pub mod registry;
pub mod tokens;
pub mod units;

pub use client::{ChainError, ChainReader, EvmClient};
pub use gas::{GasEstimate, TRANSFER_GAS_LIMIT};
pub use registry::{ChainDescriptor, ChainRegistry, RegistryError, ResolvedChain, DEFAULT_CHAIN_KEY};
pub use tokens::{TokenAbi, TokenCatalog, TokenDescriptor};
