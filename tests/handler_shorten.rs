mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;

use kv_shortener::api::handlers::shorten_handler;
use kv_shortener::application::services::CodeAllocator;
use kv_shortener::domain::{AllocationPolicy, KeyValueStore, Rung};
use kv_shortener::infrastructure::store::MemoryStore;
use kv_shortener::state::AppState;

fn app(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_shorten_success() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app(state)).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_url = json["short_url"].as_str().unwrap();
    assert!(short_url.starts_with('/'));

    let code = &short_url[1..];
    assert_eq!(code.len(), 6);
    assert_eq!(
        store.get(code).await.unwrap().as_deref(),
        Some("https://example.com")
    );
}

#[tokio::test]
async fn test_shorten_same_url_returns_same_code() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app(state)).unwrap();

    let first = server
        .post("/shorten")
        .json(&json!({ "url": "http://x.com" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/shorten")
        .json(&json!({ "url": "  http://x.com  " }))
        .await
        .json::<serde_json::Value>();

    assert_eq!(first["short_url"], second["short_url"]);
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_shorten_distinct_urls() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(app(state)).unwrap();

    let first = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/one" }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/two" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(first["short_url"], second["short_url"]);
}

#[tokio::test]
async fn test_shorten_blank_url() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app(state)).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "   " }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "validation_error");
    assert!(json["detail"].is_string());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_shorten_missing_field() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(app(state)).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "link": "https://example.com" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "validation_error");
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn test_shorten_non_json_body() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app(state)).unwrap();

    let response = server.post("/shorten").text("https://example.com").await;

    response.assert_status_bad_request();
    assert_eq!(
        response.header("content-type"),
        "application/json"
    );
    assert_eq!(
        response.json::<serde_json::Value>()["code"],
        "validation_error"
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(app(state)).unwrap();

    let response = server
        .post("/shorten")
        .content_type("application/json")
        .bytes("{\"url\": ".into())
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_shorten_store_unavailable() {
    let allocator = Arc::new(CodeAllocator::with_random_codes(
        Arc::new(common::DownStore),
        AllocationPolicy::default(),
    ));
    let server = TestServer::new(app(AppState::new(allocator))).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 503);
    assert_eq!(
        response.json::<serde_json::Value>()["code"],
        "store_unavailable"
    );
}

#[tokio::test]
async fn test_shorten_exhausted_ladder() {
    let store = Arc::new(MemoryStore::new());
    store.set("aa", "https://taken.example").await.unwrap();

    let policy = AllocationPolicy::new(vec![Rung::new(2, 2)]).unwrap();
    let allocator = Arc::new(CodeAllocator::new(
        store.clone(),
        Arc::new(common::SequenceGenerator::new(&["aa", "aa"])),
        policy,
    ));
    let server = TestServer::new(app(AppState::new(allocator))).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        store.get("aa").await.unwrap().as_deref(),
        Some("https://taken.example")
    );
    assert_eq!(store.len().await, 1);
}
