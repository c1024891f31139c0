// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OpenSea v2 account NFT client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ensure_success, MarketError, NftHolding, NftSource};

pub const DEFAULT_MAINNET_BASE_URL: &str = "https://api.opensea.io";
pub const DEFAULT_TESTNET_BASE_URL: &str = "https://testnets-api.opensea.io";
const API_KEY_HEADER: &str = "X-API-KEY";

/// Chain alias OpenSea uses for production and test networks.
pub fn network_alias(is_test_network: bool) -> &'static str {
    if is_test_network {
        "sepolia"
    } else {
        "ethereum"
    }
}

#[derive(Debug, Clone)]
pub struct OpenSeaClient {
    mainnet_base_url: String,
    testnet_base_url: String,
    api_key: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct AccountNftsResponse {
    nfts: Vec<NftHolding>,
}

impl OpenSeaClient {
    pub fn new(
        http: Client,
        mainnet_base_url: impl Into<String>,
        testnet_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            mainnet_base_url: mainnet_base_url.into(),
            testnet_base_url: testnet_base_url.into(),
            api_key: api_key.into(),
            http,
        }
    }

    fn account_nfts_url(&self, owner: &str, is_test_network: bool) -> String {
        let base = if is_test_network {
            &self.testnet_base_url
        } else {
            &self.mainnet_base_url
        };
        format!(
            "{}/api/v2/chain/{}/account/{}/nfts",
            base.trim_end_matches('/'),
            network_alias(is_test_network),
            owner
        )
    }
}

#[async_trait]
impl NftSource for OpenSeaClient {
    async fn holdings(
        &self,
        owner: &str,
        is_test_network: bool,
    ) -> Result<Vec<NftHolding>, MarketError> {
        let url = self.account_nfts_url(owner, is_test_network);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MarketError::Request(format!("GET account nfts failed: {e}")))?;

        let payload: AccountNftsResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| MarketError::InvalidResponse(format!("account nfts invalid JSON: {e}")))?;

        Ok(payload.nfts)
    }
}
