use crate::application::registry::ProviderRegistry;
use crate::domain::error::AppError;
use crate::domain::traits::SnapshotStore;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::storage::ResultCache;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything an entry point needs, passed explicitly instead of living in globals.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
    pub cache: Arc<ResultCache>,
    pub snapshots: Arc<dyn SnapshotStore>,
    pub config: Arc<RwLock<Config>>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config, snapshots: Arc<dyn SnapshotStore>) -> Result<Self, AppError> {
        let http_client = create_client(&config.network)?;
        let registry = ProviderRegistry::with_defaults(http_client.clone(), &config.network);
        Ok(Self::with_registry(config, registry, snapshots, http_client))
    }

    pub fn with_registry(
        config: Config,
        registry: ProviderRegistry,
        snapshots: Arc<dyn SnapshotStore>,
        http_client: Client,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            cache: Arc::new(ResultCache::from_config(&config.cache)),
            snapshots,
            config: Arc::new(RwLock::new(config)),
            http_client,
        }
    }
}
