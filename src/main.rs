// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process::ExitCode, sync::Arc};

use tokio::net::TcpListener;

use wallet_portfolio_server::{
    api::router,
    chain::{ChainRegistry, TokenCatalog},
    config::AppConfig,
    market::{CoinMarketCapClient, OpenSeaClient},
    portfolio::PortfolioAggregator,
    state::AppState,
    telemetry,
};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init(config.log_format) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(ChainRegistry::connect(&config.chains, &config.default_chain)?);
    tracing::info!(
        chains = ?registry.keys(),
        default_chain = %registry.default_key(),
        "Chain registry ready"
    );

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    let quotes = CoinMarketCapClient::new(
        http.clone(),
        config.coin_market_cap.base_url.clone(),
        config.coin_market_cap.api_key.clone(),
    );
    let nfts = OpenSeaClient::new(
        http,
        config.open_sea.mainnet_base_url.clone(),
        config.open_sea.testnet_base_url.clone(),
        config.open_sea.api_key.clone(),
    );

    let portfolio = PortfolioAggregator::new(
        registry.clone(),
        Arc::new(TokenCatalog::builtin()),
        Arc::new(quotes),
        Arc::new(nfts),
    );
    let app = router(AppState::new(registry, portfolio));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Wallet portfolio server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
