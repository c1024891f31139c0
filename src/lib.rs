// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet Portfolio Server - EVM wallet snapshots and gas estimates
//!
//! Aggregates native balances, ERC-20 balances, USD quotes and NFT holdings
//! of a wallet across several EVM chains, and estimates transfer fees.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `chain` - Chain registry, token catalog, balance reads and gas estimation
//! - `market` - CoinMarketCap quotes and OpenSea NFT holdings
//! - `portfolio` - Concurrent wallet snapshot aggregation
//! - `store` - In-memory session data

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod market;
pub mod models;
pub mod portfolio;
pub mod state;
pub mod store;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;
