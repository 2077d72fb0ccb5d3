//! In-memory collaborators for pipeline unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use order_seeder_core::{
    Customer, CustomerId, OrderId, OrderRequest, Product, ProductId, Variant, VariantId,
};
use tokio::time::Instant;

use super::gateway::{CreateOrderResult, GatewayError, OrderGateway, ReferenceSource, UserError};
use super::random::RandomSource;
use super::reference::ReferenceData;

/// Product `n` with `variants` variants numbered `n * 100 + i`.
pub fn product(n: u64, variants: u64) -> Product {
    Product {
        id: ProductId::from_numeric(n),
        title: format!("Product {n}"),
        vendor: Some(format!("Vendor {n}")),
        variants: (0..variants)
            .map(|i| Variant {
                id: VariantId::from_numeric(n * 100 + i),
                title: format!("Variant {i}"),
                sku: Some(format!("SKU-{n}-{i}")),
            })
            .collect(),
    }
}

pub fn customer(n: u64) -> Customer {
    Customer::new(CustomerId::from_numeric(n))
}

/// Reference data with `customers` customers and `products` single-variant products.
pub fn reference(customers: u64, products: u64) -> ReferenceData {
    ReferenceData::new(
        (1..=customers).map(customer).collect(),
        (1..=products).map(|n| product(n, 1)).collect(),
    )
}

pub fn user_error(message: &str) -> UserError {
    UserError {
        field: vec!["order".to_string(), "lineItems".to_string()],
        message: message.to_string(),
    }
}

/// Replays a fixed script of draws, wrapping around at the end.
pub struct ScriptedRandom {
    script: Vec<usize>,
    cursor: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(script: Vec<usize>) -> Self {
        Self {
            script,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&self, upper: usize) -> usize {
        let i = self.cursor.fetch_add(1, Ordering::SeqCst);
        let value = self
            .script
            .get(i % self.script.len().max(1))
            .copied()
            .unwrap_or(0);
        value % upper.max(1)
    }
}

pub struct FakeReferenceSource {
    customers: Result<Vec<Customer>, GatewayError>,
    products: Result<Vec<Product>, GatewayError>,
    limits: Mutex<Option<(i64, i64, i64)>>,
}

impl FakeReferenceSource {
    pub fn new(
        customers: Result<Vec<Customer>, GatewayError>,
        products: Result<Vec<Product>, GatewayError>,
    ) -> Self {
        Self {
            customers,
            products,
            limits: Mutex::new(None),
        }
    }

    pub fn requested_limits(&self) -> Option<(i64, i64, i64)> {
        *self.limits.lock().unwrap()
    }
}

#[async_trait]
impl ReferenceSource for FakeReferenceSource {
    async fn fetch_customers(&self, limit: i64) -> Result<Vec<Customer>, GatewayError> {
        let mut limits = self.limits.lock().unwrap();
        let (_, p, v) = limits.unwrap_or((0, 0, 0));
        *limits = Some((limit, p, v));
        self.customers.clone()
    }

    async fn fetch_products(
        &self,
        limit: i64,
        variant_limit: i64,
    ) -> Result<Vec<Product>, GatewayError> {
        let mut limits = self.limits.lock().unwrap();
        let (c, _, _) = limits.unwrap_or((0, 0, 0));
        *limits = Some((c, limit, variant_limit));
        self.products.clone()
    }
}

/// Gateway that replays scripted responses, then succeeds.
#[derive(Default)]
pub struct FakeGateway {
    script: Mutex<VecDeque<Result<CreateOrderResult, GatewayError>>>,
    requests: Mutex<Vec<OrderRequest>>,
    call_times: Mutex<Vec<Instant>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    created: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Result<CreateOrderResult, GatewayError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderGateway for FakeGateway {
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<CreateOrderResult, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.call_times.lock().unwrap().push(Instant::now());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(CreateOrderResult::Created {
                order_id: OrderId::from_numeric(n as u64),
            })
        })
    }
}
