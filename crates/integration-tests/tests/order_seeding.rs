//! Integration tests for the seeding pipeline over HTTP.
//!
//! These tests run the real Admin client, conversions, and orchestrator
//! against a fake GraphQL endpoint on localhost.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use order_seeder_admin::seeding::{
    BatchOrchestrator, ReferenceData, RunRequest, SeededRandom, SubmissionOutcome,
};
use order_seeder_integration_tests::{FakeShopify, FakeStore, OrderReply, fast_seeding_config};
use tokio_util::sync::CancellationToken;

async fn run(
    shopify: &FakeShopify,
    count: i64,
) -> order_seeder_admin::seeding::BatchReport {
    let client = Arc::new(shopify.client());
    let config = fast_seeding_config();
    let reference = Arc::new(ReferenceData::load(client.as_ref(), config.limits).await);

    BatchOrchestrator::new(client, Arc::new(SeededRandom::new(1)), &config)
        .run(RunRequest::new(count), reference, &CancellationToken::new())
        .await
        .unwrap()
}

// =============================================================================
// Reference Data
// =============================================================================

#[tokio::test]
async fn test_reference_data_loads_over_graphql() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 4,
        variants_per_product: vec![2, 0, 1],
        ..FakeStore::default()
    })
    .await;

    let client = shopify.client();
    let reference = ReferenceData::load(&client, fast_seeding_config().limits).await;

    assert_eq!(reference.customers().len(), 4);
    assert_eq!(reference.products().len(), 3);
    assert_eq!(reference.orderable_products().count(), 2);
    assert_eq!(shopify.calls("GetSeedCustomers"), 1);
    assert_eq!(shopify.calls("GetSeedProducts"), 1);
}

#[tokio::test]
async fn test_unauthorized_reference_fetch_yields_insufficient_data() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 2,
        variants_per_product: vec![1],
        ..FakeStore::default()
    })
    .await;

    let client = Arc::new(shopify.client_with_bad_token());
    let config = fast_seeding_config();
    let reference = Arc::new(ReferenceData::load(client.as_ref(), config.limits).await);
    assert!(reference.customers().is_empty());

    let report = BatchOrchestrator::new(client, Arc::new(SeededRandom::new(1)), &config)
        .run(RunRequest::new(3), reference, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.summary().insufficient_reference_data, 3);
    assert_eq!(shopify.calls("SeedOrderCreate"), 0);
}

// =============================================================================
// Order Creation
// =============================================================================

#[tokio::test]
async fn test_orders_created_with_expected_payload() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 3,
        variants_per_product: vec![1, 2],
        ..FakeStore::default()
    })
    .await;

    let report = run(&shopify, 5).await;

    assert_eq!(report.len(), 5);
    assert_eq!(report.summary().succeeded, 5);
    assert_eq!(report.created_order_ids().count(), 5);

    for variables in shopify.order_variables() {
        let order = &variables["order"];
        assert_eq!(order["currency"], "EUR");
        assert_eq!(order["financialStatus"], "PAID");
        assert!(
            order["customer"]["toAssociate"]["id"]
                .as_str()
                .unwrap()
                .starts_with("gid://shopify/Customer/")
        );

        let lines = order["lineItems"].as_array().unwrap();
        assert!((1..=2).contains(&lines.len()));
        for line in lines {
            let quantity = line["quantity"].as_u64().unwrap();
            assert!((1..=10).contains(&quantity));
            assert_eq!(line["priceSet"]["shopMoney"]["amount"], "119.24");
            // first variant of the product
            let product = line["productId"].as_str().unwrap();
            let n: u64 = product.rsplit('/').next().unwrap().parse().unwrap();
            assert_eq!(
                line["variantId"],
                format!("gid://shopify/ProductVariant/{}", n * 100)
            );
        }

        assert_eq!(order["transactions"][0]["kind"], "SALE");
        assert_eq!(order["transactions"][0]["status"], "SUCCESS");
        assert_eq!(
            order["transactions"][0]["amountSet"]["shopMoney"]["amount"],
            "238.47"
        );
        assert_eq!(variables["options"]["sendReceipt"], false);
    }
}

#[tokio::test]
async fn test_http_429_is_retried() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 1,
        variants_per_product: vec![1],
        order_script: vec![OrderReply::TooManyRequests(0.02)],
    })
    .await;

    let report = run(&shopify, 1).await;

    let SubmissionOutcome::Succeeded { attempts, .. } = &report.outcomes()[0] else {
        panic!("expected success, got {:?}", report.outcomes()[0]);
    };
    assert_eq!(*attempts, 2);
    assert_eq!(shopify.calls("SeedOrderCreate"), 2);
}

#[tokio::test]
async fn test_graphql_throttle_is_retried_after_restore_time() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 1,
        variants_per_product: vec![1],
        order_script: vec![OrderReply::Throttled],
    })
    .await;

    let start = Instant::now();
    let report = run(&shopify, 1).await;

    assert!(report.outcomes()[0].is_success());
    assert_eq!(shopify.calls("SeedOrderCreate"), 2);
    // 10 points at 50/s rounds up to the one-second minimum
    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_user_errors_are_not_retried() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 1,
        variants_per_product: vec![1],
        order_script: vec![OrderReply::UserErrors(vec!["Variant is out of stock"])],
    })
    .await;

    let report = run(&shopify, 1).await;

    let SubmissionOutcome::RejectedByServer { field_errors } = &report.outcomes()[0] else {
        panic!("expected rejection, got {:?}", report.outcomes()[0]);
    };
    assert_eq!(field_errors[0].message, "Variant is out of stock");
    assert_eq!(field_errors[0].field, vec!["order", "lineItems"]);
    assert_eq!(shopify.calls("SeedOrderCreate"), 1);
}

#[tokio::test]
async fn test_server_error_is_terminal() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 1,
        variants_per_product: vec![1],
        order_script: vec![OrderReply::ServerError],
    })
    .await;

    let report = run(&shopify, 3).await;

    let summary = report.summary();
    assert_eq!(summary.transport_failed, 1);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(shopify.calls("SeedOrderCreate"), 3);
}

#[tokio::test]
async fn test_throttle_budget_exhaustion_reports_transport_failure() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 1,
        variants_per_product: vec![1],
        order_script: vec![
            OrderReply::TooManyRequests(0.01),
            OrderReply::TooManyRequests(0.01),
            OrderReply::TooManyRequests(0.01),
        ],
    })
    .await;

    let report = run(&shopify, 1).await;

    assert!(matches!(
        report.outcomes()[0],
        SubmissionOutcome::TransportFailed { .. }
    ));
    assert_eq!(shopify.calls("SeedOrderCreate"), 3);
}

#[tokio::test]
async fn test_batches_are_separated_by_delay() {
    let shopify = FakeShopify::start(FakeStore {
        customers: 2,
        variants_per_product: vec![1],
        ..FakeStore::default()
    })
    .await;

    let start = Instant::now();
    let report = run(&shopify, 5).await;

    // batches of 2, 2, 1 with 20ms between them
    assert_eq!(report.len(), 5);
    assert!(start.elapsed() >= Duration::from_millis(40));
}
