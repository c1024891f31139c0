// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::chain::ChainRegistry;
use crate::portfolio::PortfolioAggregator;
use crate::store::SessionStore;

/// Shared handler state. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ChainRegistry>,
    pub portfolio: Arc<PortfolioAggregator>,
    pub store: Arc<RwLock<SessionStore>>,
}

impl AppState {
    pub fn new(registry: Arc<ChainRegistry>, portfolio: PortfolioAggregator) -> Self {
        Self {
            registry,
            portfolio: Arc::new(portfolio),
            store: Arc::new(RwLock::new(SessionStore::new())),
        }
    }
}
