// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        GasPriceResponse, SendTransactionRequest, SendTransactionResponse, SessionData,
        StoreDataRequest, TokenBalanceView, WalletResponse,
    },
    state::AppState,
};

pub mod gas;
pub mod health;
pub mod sessions;
pub mod transactions;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/get-wallet", get(wallet::get_wallet))
        .route("/get-gas-price", get(gas::get_gas_price))
        .route("/send-transaction", post(transactions::send_transaction))
        .route("/sdk/store-data", post(sessions::store_data))
        .route("/sdk/get-data", get(sessions::get_data))
        .route("/health", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        wallet::get_wallet,
        gas::get_gas_price,
        transactions::send_transaction,
        sessions::store_data,
        sessions::get_data,
        health::liveness
    ),
    components(
        schemas(
            WalletResponse,
            TokenBalanceView,
            GasPriceResponse,
            SendTransactionRequest,
            SendTransactionResponse,
            StoreDataRequest,
            SessionData,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Wallet", description = "Wallet portfolio snapshots"),
        (name = "Gas", description = "Gas price and transfer fee estimates"),
        (name = "Transactions", description = "Signed transaction broadcast"),
        (name = "Sessions", description = "dApp session data exchange"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use alloy::primitives::{address, keccak256, Address, U256};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::chain::{TokenCatalog, TokenDescriptor};
    use crate::portfolio::PortfolioAggregator;
    use crate::testing::{holding, quote, registry_with, FakeChain, FakeNfts, FakeQuotes};

    const OWNER: Address = address!("0x1111111111111111111111111111111111111111");
    const TOKEN: Address = address!("0x2222222222222222222222222222222222222222");

    fn app_with(chain: FakeChain, nfts: FakeNfts) -> Router {
        let registry = Arc::new(registry_with(chain));
        let catalog = TokenCatalog::new().with_chain(
            "sepolia",
            vec![TokenDescriptor::erc20("USDC", TOKEN, Some(6))],
        );
        let quotes = FakeQuotes::default()
            .with_quote("ETH", quote(2000, -3))
            .with_quote("USDC", quote(1, 0));
        let portfolio = PortfolioAggregator::new(
            registry.clone(),
            Arc::new(catalog),
            Arc::new(quotes),
            Arc::new(nfts),
        );
        router(AppState::new(registry, portfolio))
    }

    fn app() -> Router {
        let chain = FakeChain::default()
            .with_native(OWNER, U256::from(2_000_000_000_000_000_000u64))
            .with_token(TOKEN, OWNER, U256::from(12_500_000u64), 6)
            .with_gas_price(20_000_000_000)
            .with_nonce(OWNER, 7);
        app_with(chain, FakeNfts::default().with_holdings(vec![holding("1")]))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn get_wallet_returns_snapshot() {
        let uri = format!("/get-wallet?address={OWNER}&chain=sepolia");
        let (status, body) = send(app(), get(&uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], json!(2.0));
        assert_eq!(body["price"], json!(2000.0));
        assert_eq!(body["percent_change"], json!(-3.0));
        assert_eq!(body["chain"], json!("sepolia"));
        assert_eq!(body["fallback"], json!(false));
        assert_eq!(body["nfts"][0]["identifier"], json!("1"));
        assert_eq!(body["tokens"][0]["symbol"], json!("USDC"));
        assert_eq!(body["tokens"][0]["balance"], json!(12.5));
    }

    #[tokio::test]
    async fn get_wallet_rejects_bad_address_with_generic_message() {
        let (status, body) = send(app(), get("/get-wallet?address=0x1234&chain=sepolia")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "invalid address or chain", "error_code": "invalid_address" })
        );
    }

    #[tokio::test]
    async fn get_wallet_flattens_upstream_failure() {
        let chain = FakeChain::default().with_token(TOKEN, OWNER, U256::ZERO, 6);
        let app = app_with(chain, FakeNfts::failing("rate limited"));
        let uri = format!("/get-wallet?address={OWNER}&chain=sepolia");
        let (status, body) = send(app, get(&uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("invalid address or chain"));
        assert_eq!(body["error_code"], json!("nft_provider_failure"));
    }

    #[tokio::test]
    async fn get_gas_price_includes_nonce_when_requested() {
        let uri = format!("/get-gas-price?chain=sepolia&walletAddress={OWNER}");
        let (status, body) = send(app(), get(&uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "gasPriceWei": "20000000000",
                "gasPriceGwei": "20",
                "estimatedFeeWei": "420000000000000",
                "nonce": 7
            })
        );
    }

    #[tokio::test]
    async fn get_gas_price_without_address_omits_nonce() {
        let (status, body) = send(app(), get("/get-gas-price?chain=unknown")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("nonce").is_none());
    }

    #[tokio::test]
    async fn get_gas_price_failure_is_400() {
        let app = app_with(FakeChain::default(), FakeNfts::default());
        let (status, body) = send(app, get("/get-gas-price?chain=sepolia")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Error while fetching gas price"));
        assert_eq!(body["error_code"], json!("gas_query_failure"));
    }

    #[tokio::test]
    async fn send_transaction_broadcasts_raw_bytes() {
        let chain = FakeChain::default();
        let broadcasts = chain.broadcasts();
        let app = app_with(chain, FakeNfts::default());

        let (status, body) = send(
            app,
            post_json("/send-transaction", json!({ "chain": "sepolia", "signedTxn": "0x02f8" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["transactionHash"],
            json!(keccak256([0x02u8, 0xf8]).to_string())
        );
        assert_eq!(broadcasts.lock().unwrap().as_slice(), &[vec![0x02u8, 0xf8]]);
    }

    #[tokio::test]
    async fn send_transaction_rejects_malformed_hex_before_broadcast() {
        let chain = FakeChain::default();
        let broadcasts = chain.broadcasts();
        let app = app_with(chain, FakeNfts::default());

        let (status, body) = send(
            app,
            post_json("/send-transaction", json!({ "chain": "sepolia", "signedTxn": "0xnothex" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], json!("invalid_transaction"));
        assert!(broadcasts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_transaction_without_signed_txn_is_invalid_transaction() {
        let chain = FakeChain::default();
        let broadcasts = chain.broadcasts();
        let app = app_with(chain, FakeNfts::default());

        let (status, body) =
            send(app, post_json("/send-transaction", json!({ "chain": "sepolia" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], json!("invalid_transaction"));
        assert!(body["error"].as_str().unwrap().contains("signedTxn is required"));
        assert!(broadcasts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_json_body_gets_error_body() {
        let request = Request::post("/send-transaction")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("signedTxn=0x02f8"))
            .unwrap();
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], json!("invalid_request"));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn session_endpoints_reject_missing_session_id() {
        let (status, body) = send(app(), post_json("/sdk/store-data", json!({ "data": {} }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "sessionId is required", "error_code": "invalid_request" })
        );

        let (status, body) = send(app(), get("/sdk/get-data")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], json!("invalid_request"));
    }

    #[tokio::test]
    async fn session_data_round_trip_and_duplicate() {
        let app = app();
        let payload = json!({ "sessionId": "abc", "data": { "signature": "0xdead" } });

        let (status, stored) = send(app.clone(), post_json("/sdk/store-data", payload.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["sessionId"], json!("abc"));

        let (status, _) = send(app.clone(), post_json("/sdk/store-data", payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, fetched) = send(app.clone(), get("/sdk/get-data?sessionId=abc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, stored);

        let (status, body) = send(app, get("/sdk/get-data?sessionId=missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Signature not found" }));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = send(app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = send(app(), get("/api-doc/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/get-wallet").is_some());
    }
}
