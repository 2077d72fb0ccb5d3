//! Synthetic order commands.
//!
//! # Usage
//!
//! ```bash
//! seed-cli orders generate -c 12 -b 5 -d 10000 -o report.json
//! seed-cli orders preview -c 3 -s 42
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Store domain (`my-store.myshopify.com`)
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token
//! - `ORDER_SEED_*` - Seeding defaults, see `order_seeder_admin::config`

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use order_seeder_admin::config::{ConfigError, SeederConfig};
use order_seeder_admin::routes::orders::GenerateOrdersResponse;
use order_seeder_admin::seeding::{
    BatchOrchestrator, OrderSynthesizer, RandomSource, ReferenceData, RunRequest, SeedError,
    SeededRandom, ThreadRandom,
};
use order_seeder_admin::shopify::{AdminClient, AdminShopifyError};
use order_seeder_core::OrderRequest;
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// Errors that can occur while running order commands.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shopify client could not be created.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// The run request or reference data was unusable.
    #[error(transparent)]
    Seed(#[from] SeedError),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options of `orders generate`.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub count: i64,
    pub batch_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl From<GenerateOptions> for RunRequest {
    fn from(options: GenerateOptions) -> Self {
        Self {
            count: options.count,
            batch_size: options.batch_size,
            inter_batch_delay: options.delay_ms.map(Duration::from_millis),
        }
    }
}

fn random_source(seed: Option<u64>) -> Arc<dyn RandomSource> {
    match seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    }
}

/// Create synthetic orders and write the JSON report.
///
/// # Errors
///
/// Returns an error if configuration is missing, the request is invalid,
/// or the report cannot be written. Per-order failures are part of the
/// report, not errors.
pub async fn generate(options: GenerateOptions, output: Option<&Path>) -> Result<(), OrdersError> {
    dotenvy::dotenv().ok();

    let config = SeederConfig::from_env()?;
    let request = RunRequest::from(options);
    request.plan(&config.seeding)?;

    let client = Arc::new(AdminClient::new(&config.shopify)?);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Ctrl+C received, cancelling remaining orders");
                cancel.cancel();
            }
        }
    });

    let run_id = Uuid::new_v4();
    let span = info_span!("seeding_run", %run_id, count = request.count);
    let started_at = Utc::now();

    let reference = Arc::new(
        ReferenceData::load(client.as_ref(), config.seeding.limits)
            .instrument(span.clone())
            .await,
    );
    let orchestrator = BatchOrchestrator::new(client, random_source(options.seed), &config.seeding);
    let report = orchestrator
        .run(request, reference, &cancel)
        .instrument(span)
        .await?;

    let summary = report.summary();
    info!(
        %run_id,
        succeeded = summary.succeeded,
        rejected = summary.rejected,
        transport_failed = summary.transport_failed,
        cancelled = summary.cancelled,
        "Run complete"
    );

    let response = GenerateOrdersResponse {
        run_id,
        started_at,
        finished_at: Utc::now(),
        summary,
        outcomes: report.into_outcomes(),
    };
    write_json(&response, output).await
}

/// Synthesize `count` orders from live reference data and print them.
///
/// Nothing is created; only the reference queries are sent.
///
/// # Errors
///
/// Returns an error if configuration is missing, `count` is not positive or
/// above `ORDER_SEED_MAX_COUNT`, or the reference data cannot produce an order.
pub async fn preview(count: i64, seed: Option<u64>) -> Result<(), OrdersError> {
    dotenvy::dotenv().ok();

    let config = SeederConfig::from_env()?;
    let count = RunRequest::new(count).plan(&config.seeding)?.total();

    let client = AdminClient::new(&config.shopify)?;
    let reference = ReferenceData::load(&client, config.seeding.limits).await;

    let synthesizer = OrderSynthesizer::new(config.seeding.synthesizer);
    let rng = random_source(seed);
    let orders = (0..count)
        .map(|_| synthesizer.synthesize(&reference, rng.as_ref()))
        .collect::<Result<Vec<OrderRequest>, _>>()?;

    write_json(&orders, None).await
}

async fn write_json<T: Serialize + Sync>(
    value: &T,
    output: Option<&Path>,
) -> Result<(), OrdersError> {
    let mut json = serde_json::to_vec_pretty(value)?;
    json.push(b'\n');

    match output {
        Some(path) => {
            tokio::fs::write(path, &json).await?;
            info!(path = %path.display(), "Report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&json)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_options_into_run_request() {
        let request = RunRequest::from(GenerateOptions {
            count: 12,
            batch_size: Some(4),
            delay_ms: Some(2500),
            seed: None,
        });

        assert_eq!(request.count, 12);
        assert_eq!(request.batch_size, Some(4));
        assert_eq!(request.inter_batch_delay, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = random_source(Some(7));
        let b = random_source(Some(7));
        let draws_a: Vec<_> = (0..20).map(|_| a.pick(100)).collect();
        let draws_b: Vec<_> = (0..20).map(|_| b.pick(100)).collect();
        assert_eq!(draws_a, draws_b);
    }
}
