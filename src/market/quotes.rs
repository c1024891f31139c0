// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CoinMarketCap latest-quotes client.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{ensure_success, MarketError, Quote, QuoteSource};

pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com";
const QUOTES_PATH: &str = "/v1/cryptocurrency/quotes/latest";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const CONVERT: &str = "USD";

#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    base_url: String,
    api_key: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    data: HashMap<String, AssetQuotes>,
}

#[derive(Debug, Deserialize)]
struct AssetQuotes {
    quote: HashMap<String, ConvertedQuote>,
}

#[derive(Debug, Deserialize)]
struct ConvertedQuote {
    price: Option<Decimal>,
    percent_change_24h: Option<Decimal>,
}

impl CoinMarketCapClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http,
        }
    }

    async fn fetch(&self, symbol: &str) -> Result<Quote, MarketError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url.trim_end_matches('/'), QUOTES_PATH))
            .query(&[("symbol", symbol), ("convert", CONVERT)])
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MarketError::Request(format!("GET {QUOTES_PATH} failed: {e}")))?;

        let payload: QuotesResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| MarketError::InvalidResponse(format!("GET {QUOTES_PATH} invalid JSON: {e}")))?;

        extract_quote(payload, symbol)
    }
}

#[async_trait]
impl QuoteSource for CoinMarketCapClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketError> {
        self.fetch(symbol).await
    }
}

fn extract_quote(mut payload: QuotesResponse, symbol: &str) -> Result<Quote, MarketError> {
    let asset = payload
        .data
        .remove(symbol)
        .or_else(|| payload.data.remove(&symbol.to_ascii_uppercase()))
        .ok_or_else(|| MarketError::MissingSymbol(symbol.to_string()))?;

    let usd = asset.quote.get(CONVERT).ok_or_else(|| {
        MarketError::InvalidResponse(format!("no {CONVERT} quote for {symbol}"))
    })?;

    match (usd.price, usd.percent_change_24h) {
        (Some(price_usd), Some(percent_change_24h)) => Ok(Quote {
            price_usd,
            percent_change_24h,
        }),
        _ => Err(MarketError::InvalidResponse(format!(
            "incomplete {CONVERT} quote for {symbol}"
        ))),
    }
}
