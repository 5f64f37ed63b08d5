use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::json;

use super::*;
use crate::panels::{ChatPanel, ChatRequest, MarketPanel, WalletPanel};

/// Serve `app` on an ephemeral port and return a client pointed at it.
async fn serve(app: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let config = ApiConfig::new(&format!("http://{addr}")).unwrap();
    ApiClient::new(&config).unwrap()
}

fn wallet_json(address: &str) -> Value {
    json!({
        "address": address,
        "balance": "1 ETH",
        "nftCount": 2,
        "totalValue": "$1",
        "riskScore": 4.5,
        "lastActivity": "now"
    })
}

// =============================================================================
// endpoints
// =============================================================================

#[test]
fn endpoint_paths_and_methods() {
    assert_eq!(Endpoint::AnalyzeWallet.path(), "/api/analyze/wallet");
    assert_eq!(Endpoint::MarketInsights.method(), Method::GET);
    assert_eq!(Endpoint::Chat.method(), Method::POST);
}

// =============================================================================
// envelope
// =============================================================================

#[test]
fn bare_body_passes_through() {
    let body = json!({ "address": "0x1" });
    assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
}

#[test]
fn non_boolean_success_is_not_an_envelope() {
    let body = json!({ "success": "yes", "data": 1 });
    assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
}

#[test]
fn successful_envelope_yields_data() {
    assert_eq!(unwrap_envelope(json!({ "success": true, "data": [1] })).unwrap(), json!([1]));
}

#[test]
fn successful_envelope_without_data_is_a_parse_error() {
    assert!(matches!(unwrap_envelope(json!({ "success": true })), Err(ApiError::Parse(_))));
}

#[test]
fn failed_envelope_reason_falls_back_through_fields() {
    let from_message = unwrap_envelope(json!({ "success": false, "message": "nope" })).unwrap_err();
    assert!(matches!(from_message, ApiError::Rejected(r) if r == "nope"));

    let bare = unwrap_envelope(json!({ "success": false })).unwrap_err();
    assert!(matches!(bare, ApiError::Rejected(r) if r == "success=false"));
}

// =============================================================================
// client against a live server
// =============================================================================

#[tokio::test]
async fn chat_posts_json_body() {
    let app = Router::new().route(
        "/api/chat",
        post(|Json(body): Json<Value>| async move {
            Json(json!({ "response": format!("{} from {}", body["message"].as_str().unwrap_or(""), body["userId"].as_str().unwrap_or("")) }))
        }),
    );
    let client = serve(app).await;

    let request = ChatRequest { message: "gm".into(), user_id: "u-7".into() };
    let reply = Source::<ChatPanel>::fetch(&client, &ChatPanel, &request).await.unwrap();

    assert_eq!(reply.response, "gm from u-7");
}

#[tokio::test]
async fn enveloped_wallet_decodes_through_source() {
    let app = Router::new().route(
        "/api/analyze/wallet",
        post(|Json(body): Json<Value>| async move {
            let address = body["address"].as_str().unwrap_or_default().to_owned();
            Json(json!({ "success": true, "data": wallet_json(&address) }))
        }),
    );
    let client = serve(app).await;
    let address = format!("0x{}", "d".repeat(40));

    let report = Source::<WalletPanel>::fetch(&client, &WalletPanel, &address).await.unwrap();

    assert_eq!(report.address, address);
    assert_eq!(report.nft_count, 2);
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let app = Router::new().route(
        "/api/market/insights",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = serve(app).await;

    let err = Source::<MarketPanel>::fetch(&client, &MarketPanel, &()).await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, ref body } if body == "boom"));
}

#[tokio::test]
async fn missing_route_maps_to_status() {
    let client = serve(Router::new()).await;
    let err = client.demo().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let app = Router::new().route("/demo", get(|| async { "<html>demo</html>" }));
    let client = serve(app).await;

    assert!(matches!(client.demo().await, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn health_returns_raw_text() {
    let app = Router::new().route("/health", get(|| async { "ok" }));
    let client = serve(app).await;

    assert_eq!(client.health().await.unwrap(), "ok");
}

#[tokio::test]
async fn refused_connection_is_a_request_error() {
    // Port 1 is privileged and never listening in CI.
    let client = ApiClient::new(&ApiConfig::new("http://127.0.0.1:1").unwrap()).unwrap();
    assert!(matches!(client.health().await, Err(ApiError::Request(_))));
}
