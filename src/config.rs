// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup (a `.env` file
//! is honoured) and is immutable afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `INFURA_PROJECT_ID` | Infura project used to derive RPC URLs | Required unless every `*_RPC_URL` is set |
//! | `MAINNET_RPC_URL` | Ethereum mainnet RPC override | Infura |
//! | `SEPOLIA_RPC_URL` | Sepolia RPC override | Infura |
//! | `ARBITRUM_MAINNET_RPC_URL` | Arbitrum One RPC override | Infura |
//! | `ARBITRUM_SEPOLIA_RPC_URL` | Arbitrum Sepolia RPC override | Infura |
//! | `DEFAULT_CHAIN` | Chain used for unknown chain keys | `arbitrum_sepolia` |
//! | `COIN_MARKET_CAP_API` | CoinMarketCap API key | Required |
//! | `COIN_MARKET_CAP_BASE_URL` | CoinMarketCap base URL | `https://pro-api.coinmarketcap.com` |
//! | `OPEN_SEA_API_KEY` | OpenSea API key | Required |
//! | `OPEN_SEA_MAINNET_BASE_URL` | OpenSea production base URL | `https://api.opensea.io` |
//! | `OPEN_SEA_TESTNET_BASE_URL` | OpenSea testnet base URL | `https://testnets-api.opensea.io` |
//! | `HTTP_TIMEOUT_SECS` | Timeout for market and NFT requests | `15` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use url::Url;

use crate::chain::{ChainDescriptor, DEFAULT_CHAIN_KEY};
use crate::market::{nfts, quotes};
use crate::telemetry::LogFormat;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const INFURA_PROJECT_ID_ENV: &str = "INFURA_PROJECT_ID";
pub const DEFAULT_CHAIN_ENV: &str = "DEFAULT_CHAIN";
pub const COIN_MARKET_CAP_API_ENV: &str = "COIN_MARKET_CAP_API";
pub const COIN_MARKET_CAP_BASE_URL_ENV: &str = "COIN_MARKET_CAP_BASE_URL";
pub const OPEN_SEA_API_KEY_ENV: &str = "OPEN_SEA_API_KEY";
pub const OPEN_SEA_MAINNET_BASE_URL_ENV: &str = "OPEN_SEA_MAINNET_BASE_URL";
pub const OPEN_SEA_TESTNET_BASE_URL_ENV: &str = "OPEN_SEA_TESTNET_BASE_URL";
pub const HTTP_TIMEOUT_SECS_ENV: &str = "HTTP_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Chains served out of the box.
struct KnownChain {
    key: &'static str,
    /// Subdomain of `infura.io`
    infura_network: &'static str,
    rpc_url_env: &'static str,
    is_test_network: bool,
}

const KNOWN_CHAINS: [KnownChain; 4] = [
    KnownChain {
        key: "mainnet",
        infura_network: "mainnet",
        rpc_url_env: "MAINNET_RPC_URL",
        is_test_network: false,
    },
    KnownChain {
        key: "sepolia",
        infura_network: "sepolia",
        rpc_url_env: "SEPOLIA_RPC_URL",
        is_test_network: true,
    },
    KnownChain {
        key: "arbitrum_mainnet",
        infura_network: "arbitrum-mainnet",
        rpc_url_env: "ARBITRUM_MAINNET_RPC_URL",
        is_test_network: false,
    },
    KnownChain {
        key: "arbitrum_sepolia",
        infura_network: "arbitrum-sepolia",
        rpc_url_env: "ARBITRUM_SEPOLIA_RPC_URL",
        is_test_network: true,
    },
];

#[derive(Debug, Clone)]
pub struct CoinMarketCapConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct OpenSeaConfig {
    pub mainnet_base_url: String,
    pub testnet_base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub chains: Vec<ChainDescriptor>,
    pub default_chain: String,
    pub coin_market_cap: CoinMarketCapConfig,
    pub open_sea: OpenSeaConfig,
    pub http_timeout: Duration,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &str| var(name).ok_or_else(|| ConfigError::Missing(name.to_string()));

        let port = match var(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV.to_string(),
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let http_timeout = match var(HTTP_TIMEOUT_SECS_ENV) {
            Some(raw) => Duration::from_secs(raw.parse().map_err(|_| ConfigError::Invalid {
                name: HTTP_TIMEOUT_SECS_ENV.to_string(),
                value: raw,
            })?),
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let log_format = match var(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: LOG_FORMAT_ENV.to_string(),
                value: raw,
            })?,
            None => LogFormat::default(),
        };

        let infura_project_id = var(INFURA_PROJECT_ID_ENV);
        let mut chains = Vec::with_capacity(KNOWN_CHAINS.len());
        for chain in &KNOWN_CHAINS {
            let raw_url = match (var(chain.rpc_url_env), &infura_project_id) {
                (Some(url), _) => url,
                (None, Some(project_id)) => {
                    format!("https://{}.infura.io/v3/{}", chain.infura_network, project_id)
                }
                (None, None) => return Err(ConfigError::Missing(INFURA_PROJECT_ID_ENV.to_string())),
            };
            let rpc_endpoint = Url::parse(&raw_url).map_err(|_| ConfigError::Invalid {
                name: chain.rpc_url_env.to_string(),
                value: raw_url.clone(),
            })?;

            chains.push(ChainDescriptor {
                key: chain.key.to_string(),
                rpc_endpoint,
                is_test_network: chain.is_test_network,
                native_symbol: "ETH".to_string(),
            });
        }

        let default_chain = var(DEFAULT_CHAIN_ENV).unwrap_or_else(|| DEFAULT_CHAIN_KEY.to_string());
        if !chains.iter().any(|c| c.key == default_chain) {
            return Err(ConfigError::Invalid {
                name: DEFAULT_CHAIN_ENV.to_string(),
                value: default_chain,
            });
        }

        Ok(Self {
            host: var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            chains,
            default_chain,
            coin_market_cap: CoinMarketCapConfig {
                base_url: var(COIN_MARKET_CAP_BASE_URL_ENV)
                    .unwrap_or_else(|| quotes::DEFAULT_BASE_URL.to_string()),
                api_key: required(COIN_MARKET_CAP_API_ENV)?,
            },
            open_sea: OpenSeaConfig {
                mainnet_base_url: var(OPEN_SEA_MAINNET_BASE_URL_ENV)
                    .unwrap_or_else(|| nfts::DEFAULT_MAINNET_BASE_URL.to_string()),
                testnet_base_url: var(OPEN_SEA_TESTNET_BASE_URL_ENV)
                    .unwrap_or_else(|| nfts::DEFAULT_TESTNET_BASE_URL.to_string()),
                api_key: required(OPEN_SEA_API_KEY_ENV)?,
            },
            http_timeout,
            log_format,
        })
    }

    /// Socket address string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(String),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: String, value: String },
}
