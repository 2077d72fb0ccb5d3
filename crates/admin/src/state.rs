//! Application state shared across handlers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::SeedingConfig;
use crate::seeding::{BatchOrchestrator, OrderGateway, RandomSource, ReferenceSource, ThreadRandom};
use crate::shopify::AdminClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SeedingConfig,
    references: Arc<dyn ReferenceSource>,
    gateway: Arc<dyn OrderGateway>,
    rng: Arc<dyn RandomSource>,
    shutdown: CancellationToken,
}

impl AppState {
    /// Build state from explicit collaborators.
    #[must_use]
    pub fn new(
        config: SeedingConfig,
        references: Arc<dyn ReferenceSource>,
        gateway: Arc<dyn OrderGateway>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                references,
                gateway,
                rng,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Build state backed by a Shopify Admin client and the thread RNG.
    #[must_use]
    pub fn with_shopify(config: SeedingConfig, client: AdminClient) -> Self {
        let client = Arc::new(client);
        Self::new(config, client.clone(), client, Arc::new(ThreadRandom))
    }

    /// Seeding defaults.
    #[must_use]
    pub fn config(&self) -> &SeedingConfig {
        &self.inner.config
    }

    /// Where reference data is fetched from.
    #[must_use]
    pub fn references(&self) -> &dyn ReferenceSource {
        self.inner.references.as_ref()
    }

    /// Orchestrator wired to this state's gateway and RNG.
    #[must_use]
    pub fn orchestrator(&self) -> BatchOrchestrator {
        BatchOrchestrator::new(
            self.inner.gateway.clone(),
            self.inner.rng.clone(),
            &self.inner.config,
        )
    }

    /// Root token cancelled on shutdown; runs derive child tokens from it.
    #[must_use]
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }
}
