// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! External market-data and NFT marketplace providers.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod nfts;
pub mod quotes;

pub use nfts::OpenSeaClient;
pub use quotes::CoinMarketCapClient;

/// USD price and 24h change for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub price_usd: Decimal,
    pub percent_change_24h: Decimal,
}

/// One NFT as returned by the marketplace.
///
/// Only the identifying fields are validated; everything else the provider
/// sends is kept and forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftHolding {
    pub identifier: String,
    pub contract: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Source of market quotes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketError>;
}

/// Source of NFT holdings.
#[async_trait]
pub trait NftSource: Send + Sync {
    async fn holdings(
        &self,
        owner: &str,
        is_test_network: bool,
    ) -> Result<Vec<NftHolding>, MarketError>;
}

/// Errors returned by external HTTP providers.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response was invalid: {0}")]
    InvalidResponse(String),

    #[error("symbol {0} missing from response")]
    MissingSymbol(String),
}

/// Pass successful responses through; anything else becomes `MarketError::Status`.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, MarketError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(MarketError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nft_holding_keeps_unknown_fields() {
        let raw = json!({
            "identifier": "42",
            "contract": "0xabc",
            "name": "Blob #42",
            "traits": [{"trait_type": "eyes", "value": "laser"}],
            "is_nsfw": false
        });

        let holding: NftHolding = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(holding.identifier, "42");
        assert_eq!(holding.extra.get("name"), Some(&json!("Blob #42")));
        assert_eq!(serde_json::to_value(&holding).unwrap(), raw);
    }

    #[test]
    fn nft_holding_requires_identifier() {
        let raw = json!({ "contract": "0xabc", "name": "nameless" });
        assert!(serde_json::from_value::<NftHolding>(raw).is_err());
    }
}
