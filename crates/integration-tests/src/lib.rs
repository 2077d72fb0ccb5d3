//! Integration test support for the order seeder.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (fake Shopify endpoint on localhost)
//! cargo test -p order-seeder-integration-tests
//!
//! # Live test against a development store
//! SHOPIFY_STORE=dev-store.myshopify.com SHOPIFY_ADMIN_ACCESS_TOKEN=... \
//!     cargo test -p order-seeder-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `order_seeding` - Pipeline against the fake GraphQL endpoint
//! - `admin_generate_orders` - HTTP API through the router
//! - `live_shopify` - Real store (ignored by default)

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
    routing::post,
};
use order_seeder_admin::config::SeedingConfig;
use order_seeder_admin::seeding::RetryPolicy;
use order_seeder_admin::shopify::AdminClient;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

/// Access token the fake endpoint accepts.
pub const TEST_TOKEN: &str = "shpat_integration_test_token";

/// Scripted reply to one `orderCreate` call.
#[derive(Debug, Clone)]
pub enum OrderReply {
    /// GraphQL `THROTTLED` error with cost extensions.
    Throttled,
    /// HTTP 429 with the given `Retry-After` seconds.
    TooManyRequests(f64),
    /// `userErrors` with these messages.
    UserErrors(Vec<&'static str>),
    /// HTTP 500.
    ServerError,
}

/// Store contents served by [`FakeShopify`].
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    /// Number of customers.
    pub customers: u64,
    /// Variant count of each product, in order.
    pub variants_per_product: Vec<u64>,
    /// Replies to the first `orderCreate` calls; later calls succeed.
    pub order_script: Vec<OrderReply>,
}

#[derive(Default)]
struct FakeState {
    store: FakeStore,
    script: Mutex<VecDeque<OrderReply>>,
    operations: Mutex<Vec<(String, Value)>>,
    next_order: AtomicU64,
}

/// Shopify Admin GraphQL stand-in listening on localhost.
pub struct FakeShopify {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeShopify {
    /// Start serving `store` on an ephemeral port.
    pub async fn start(store: FakeStore) -> Self {
        let state = Arc::new(FakeState {
            script: Mutex::new(store.order_script.clone().into()),
            store,
            ..FakeState::default()
        });

        let app = Router::new()
            .route("/admin/api/test/graphql.json", post(graphql))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state }
    }

    /// GraphQL endpoint URL.
    pub fn endpoint(&self) -> Url {
        Url::parse(&format!("http://{}/admin/api/test/graphql.json", self.addr)).unwrap()
    }

    /// Client pointed at this endpoint with the accepted token.
    pub fn client(&self) -> AdminClient {
        AdminClient::with_endpoint(self.endpoint(), SecretString::from(TEST_TOKEN)).unwrap()
    }

    /// Client pointed at this endpoint with a token the endpoint rejects.
    pub fn client_with_bad_token(&self) -> AdminClient {
        AdminClient::with_endpoint(self.endpoint(), SecretString::from("shpat_wrong")).unwrap()
    }

    /// Number of requests received for `operation`.
    pub fn calls(&self, operation: &str) -> usize {
        self.state
            .operations
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == operation)
            .count()
    }

    /// Total requests received.
    pub fn total_calls(&self) -> usize {
        self.state.operations.lock().unwrap().len()
    }

    /// Variables of every `orderCreate` request, in arrival order.
    pub fn order_variables(&self) -> Vec<Value> {
        self.state
            .operations
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == "SeedOrderCreate")
            .map(|(_, variables)| variables.clone())
            .collect()
    }
}

async fn graphql(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let operation = body["operationName"].as_str().unwrap_or_default().to_string();
    let variables = body["variables"].clone();
    state
        .operations
        .lock()
        .unwrap()
        .push((operation.clone(), variables.clone()));

    let token = headers
        .get("X-Shopify-Access-Token")
        .and_then(|v| v.to_str().ok());
    if token != Some(TEST_TOKEN) {
        return (StatusCode::UNAUTHORIZED, "[API] Invalid API key or access token").into_response();
    }

    match operation.as_str() {
        "GetSeedCustomers" => Json(customers(&state.store, &variables)).into_response(),
        "GetSeedProducts" => Json(products(&state.store, &variables)).into_response(),
        "SeedOrderCreate" => order_create(&state),
        other => Json(json!({ "errors": [{ "message": format!("unknown operation {other}") }] }))
            .into_response(),
    }
}

fn limit(variables: &Value, key: &str) -> usize {
    variables[key]
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(usize::MAX)
}

fn customers(store: &FakeStore, variables: &Value) -> Value {
    let edges: Vec<Value> = (1..=store.customers)
        .take(limit(variables, "first"))
        .map(|n| {
            json!({ "node": {
                "id": format!("gid://shopify/Customer/{n}"),
                "displayName": format!("Customer {n}"),
            }})
        })
        .collect();
    json!({ "data": { "customers": { "edges": edges } } })
}

fn products(store: &FakeStore, variables: &Value) -> Value {
    let variant_limit = limit(variables, "variantsFirst");
    let edges: Vec<Value> = (1_u64..)
        .zip(&store.variants_per_product)
        .take(limit(variables, "first"))
        .map(|(n, &variants)| {
            let variant_edges: Vec<Value> = (0..variants)
                .take(variant_limit)
                .map(|i| {
                    json!({ "node": {
                        "id": format!("gid://shopify/ProductVariant/{}", n * 100 + i),
                        "title": format!("Variant {i}"),
                        "sku": format!("SKU-{n}-{i}"),
                    }})
                })
                .collect();
            json!({ "node": {
                "id": format!("gid://shopify/Product/{n}"),
                "title": format!("Product {n}"),
                "vendor": format!("Vendor {n}"),
                "variants": { "edges": variant_edges },
            }})
        })
        .collect();
    json!({ "data": { "products": { "edges": edges } } })
}

fn order_create(state: &FakeState) -> Response {
    let reply = state.script.lock().unwrap().pop_front();
    match reply {
        None => {
            let n = state.next_order.fetch_add(1, Ordering::SeqCst) + 1;
            Json(json!({ "data": { "orderCreate": {
                "order": { "id": format!("gid://shopify/Order/{n}") },
                "userErrors": [],
            }}}))
            .into_response()
        }
        Some(OrderReply::Throttled) => Json(json!({
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED" } }],
            "extensions": { "cost": {
                "requestedQueryCost": 10,
                "actualQueryCost": null,
                "throttleStatus": {
                    "maximumAvailable": 1000.0,
                    "currentlyAvailable": 0,
                    "restoreRate": 50.0,
                },
            }},
        }))
        .into_response(),
        Some(OrderReply::TooManyRequests(secs)) => (
            StatusCode::TOO_MANY_REQUESTS,
            [(RETRY_AFTER, secs.to_string())],
            "Exceeded 2 calls per second for api client.",
        )
            .into_response(),
        Some(OrderReply::UserErrors(messages)) => {
            let errors: Vec<Value> = messages
                .into_iter()
                .map(|m| json!({ "field": ["order", "lineItems"], "message": m }))
                .collect();
            Json(json!({ "data": { "orderCreate": { "order": null, "userErrors": errors } } }))
                .into_response()
        }
        Some(OrderReply::ServerError) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Seeding configuration with millisecond-scale pacing for tests.
pub fn fast_seeding_config() -> SeedingConfig {
    SeedingConfig {
        batch_size: 2,
        inter_batch_delay: Duration::from_millis(20),
        retry: RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(50),
            call_timeout: Duration::from_secs(5),
            ..RetryPolicy::default()
        },
        ..SeedingConfig::default()
    }
}
