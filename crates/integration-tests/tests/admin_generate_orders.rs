//! Integration tests for the `/orders/generate` HTTP API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use order_seeder_admin::routes::orders::GenerateOrdersResponse;
use order_seeder_admin::state::AppState;
use order_seeder_integration_tests::{FakeShopify, FakeStore, OrderReply, fast_seeding_config};
use serde_json::Value;
use tower::ServiceExt;

async fn app(shopify: &FakeShopify) -> axum::Router {
    order_seeder_admin::app(AppState::with_shopify(
        fast_seeding_config(),
        shopify.client(),
    ))
}

fn generate_request(body: &str) -> Request<Body> {
    Request::post("/orders/generate")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn store() -> FakeStore {
    FakeStore {
        customers: 3,
        variants_per_product: vec![1, 1, 2],
        ..FakeStore::default()
    }
}

#[tokio::test]
async fn test_health() {
    let shopify = FakeShopify::start(store()).await;

    let response = app(&shopify)
        .await
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(shopify.total_calls(), 0);
}

#[tokio::test]
async fn test_generate_returns_one_outcome_per_order() {
    let shopify = FakeShopify::start(FakeStore {
        order_script: vec![OrderReply::UserErrors(vec!["Customer does not exist"])],
        ..store()
    })
    .await;

    let response = app(&shopify)
        .await
        .oneshot(generate_request(
            r#"{"count": 5, "batch_size": 2, "inter_batch_delay_ms": 5}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: GenerateOrdersResponse = serde_json::from_value(body_json(response).await).unwrap();

    assert_eq!(body.outcomes.len(), 5);
    assert_eq!(body.summary.total, 5);
    assert_eq!(body.summary.succeeded, 4);
    assert_eq!(body.summary.rejected, 1);
    assert!(body.finished_at >= body.started_at);
    assert_eq!(shopify.calls("SeedOrderCreate"), 5);
}

#[tokio::test]
async fn test_generate_outcomes_are_tagged() {
    let shopify = FakeShopify::start(store()).await;

    let response = app(&shopify)
        .await
        .oneshot(generate_request(r#"{"count": 1}"#))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["outcomes"][0]["status"], "succeeded");
    assert_eq!(body["outcomes"][0]["attempts"], 1);
    assert!(
        body["outcomes"][0]["order_id"]
            .as_str()
            .unwrap()
            .starts_with("gid://shopify/Order/")
    );
}

#[tokio::test]
async fn test_non_positive_count_is_rejected_without_remote_calls() {
    let shopify = FakeShopify::start(store()).await;

    for body in [r#"{"count": 0}"#, r#"{"count": -3}"#] {
        let response = app(&shopify)
            .await
            .oneshot(generate_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("count"));
    }
    assert_eq!(shopify.total_calls(), 0);
}

#[tokio::test]
async fn test_count_above_limit_is_rejected_without_remote_calls() {
    let shopify = FakeShopify::start(store()).await;

    for body in [
        r#"{"count": 10001}"#,
        r#"{"count": 9223372036854775807, "batch_size": 1}"#,
    ] {
        let response = app(&shopify)
            .await
            .oneshot(generate_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("limit"));
    }
    assert_eq!(shopify.total_calls(), 0);
}

#[tokio::test]
async fn test_zero_batch_size_is_rejected() {
    let shopify = FakeShopify::start(store()).await;

    let response = app(&shopify)
        .await
        .oneshot(generate_request(r#"{"count": 3, "batch_size": 0}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(shopify.total_calls(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let shopify = FakeShopify::start(store()).await;

    let response = app(&shopify)
        .await
        .oneshot(generate_request(r#"{"count": "many"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(shopify.total_calls(), 0);
}
