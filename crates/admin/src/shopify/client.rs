//! Shopify Admin API GraphQL client.
//!
//! Authenticates with a static Admin API access token
//! (`X-Shopify-Access-Token`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use graphql_client::GraphQLQuery;
use order_seeder_core::{Customer, OrderRequest, Product};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::conversions::{
    convert_customer, convert_order_create, convert_product, order_create_variables,
};
use super::queries::{
    GetSeedCustomers, GetSeedProducts, SeedOrderCreate, get_seed_customers, get_seed_products,
};
use super::{AdminShopifyError, GraphQLError};
use crate::config::ShopifyAdminConfig;
use crate::seeding::{CreateOrderResult, GatewayError, OrderGateway, ReferenceSource};

/// Wait used when Shopify throttles without saying for how long.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(2);

/// Connection establishment limit; whole-call limits are applied by callers.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum response body characters kept in error messages.
const ERROR_BODY_LIMIT: usize = 500;

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
    extensions: Option<ResponseExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    path: Vec<serde_json::Value>,
    extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct ErrorExtensions {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseExtensions {
    cost: Option<QueryCost>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryCost {
    requested_query_cost: Option<f64>,
    throttle_status: Option<ThrottleStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThrottleStatus {
    currently_available: f64,
    restore_rate: f64,
}

impl AdminClient {
    /// Create a client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the store
    /// domain does not form a valid URL.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, AdminShopifyError> {
        let endpoint = Url::parse(&format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store, config.api_version
        ))?;

        Self::with_endpoint(endpoint, config.access_token.clone())
    }

    /// Create a client for an explicit GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_endpoint(
        endpoint: Url,
        access_token: SecretString,
    ) -> Result<Self, AdminShopifyError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                endpoint,
                access_token,
            }),
        })
    }

    /// The GraphQL endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AdminShopifyError::RateLimited(retry_after(
                response.headers(),
            )));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AdminShopifyError::Status {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let text = response.text().await?;
        parse_response::<Q::ResponseData>(&text)
    }

    // =========================================================================
    // Reference data
    // =========================================================================

    /// Get up to `first` customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_customers(&self, first: i64) -> Result<Vec<Customer>, AdminShopifyError> {
        let response = self
            .execute::<GetSeedCustomers>(get_seed_customers::Variables { first })
            .await?;

        Ok(response
            .customers
            .edges
            .into_iter()
            .map(|edge| convert_customer(edge.node))
            .collect())
    }

    /// Get up to `first` products with up to `variants_first` variants each.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: i64,
        variants_first: i64,
    ) -> Result<Vec<Product>, AdminShopifyError> {
        let response = self
            .execute::<GetSeedProducts>(get_seed_products::Variables {
                first,
                variants_first,
            })
            .await?;

        Ok(response
            .products
            .edges
            .into_iter()
            .map(|edge| convert_product(edge.node))
            .collect())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Create an order with `orderCreate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation returns
    /// top-level GraphQL errors. Validation failures are returned as
    /// [`CreateOrderResult::Rejected`], not as errors.
    #[instrument(skip_all, fields(line_items = request.line_items().len()))]
    pub async fn order_create(
        &self,
        request: &OrderRequest,
    ) -> Result<CreateOrderResult, AdminShopifyError> {
        let response = self
            .execute::<SeedOrderCreate>(order_create_variables(request))
            .await?;

        let result = convert_order_create(response.order_create);
        debug!(?result, "orderCreate completed");
        Ok(result)
    }
}

#[async_trait]
impl ReferenceSource for AdminClient {
    async fn fetch_customers(&self, limit: i64) -> Result<Vec<Customer>, GatewayError> {
        Ok(self.get_customers(limit).await?)
    }

    async fn fetch_products(
        &self,
        limit: i64,
        variant_limit: i64,
    ) -> Result<Vec<Product>, GatewayError> {
        Ok(self.get_products(limit, variant_limit).await?)
    }
}

#[async_trait]
impl OrderGateway for AdminClient {
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<CreateOrderResult, GatewayError> {
        Ok(self.order_create(request).await?)
    }
}

/// Parse a GraphQL response body, surfacing throttling as `RateLimited`.
fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, AdminShopifyError> {
    let response: GraphQLResponse<T> = serde_json::from_str(body)?;

    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        let throttled = errors.iter().any(|e| {
            e.extensions
                .as_ref()
                .and_then(|x| x.code.as_deref())
                .is_some_and(|code| code == "THROTTLED")
        });
        if throttled {
            let cost = response.extensions.and_then(|x| x.cost);
            return Err(AdminShopifyError::RateLimited(throttle_wait(cost.as_ref())));
        }

        return Err(AdminShopifyError::GraphQL(
            errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    code: e.extensions.and_then(|x| x.code),
                    path: e.path,
                })
                .collect(),
        ));
    }

    response.data.ok_or_else(|| {
        AdminShopifyError::GraphQL(vec![GraphQLError {
            message: "No data in response".to_string(),
            code: None,
            path: vec![],
        }])
    })
}

/// Time until the bucket has restored enough points for the query.
fn throttle_wait(cost: Option<&QueryCost>) -> Duration {
    let Some(cost) = cost else {
        return DEFAULT_RETRY_AFTER;
    };
    let (Some(requested), Some(status)) = (cost.requested_query_cost, &cost.throttle_status)
    else {
        return DEFAULT_RETRY_AFTER;
    };
    if status.restore_rate <= 0.0 {
        return DEFAULT_RETRY_AFTER;
    }

    let missing = (requested - status.currently_available).max(0.0);
    let secs = (missing / status.restore_rate).ceil().max(1.0);
    Duration::try_from_secs_f64(secs).unwrap_or(DEFAULT_RETRY_AFTER)
}

/// `Retry-After` in (possibly fractional) seconds.
fn retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or(DEFAULT_RETRY_AFTER)
}
