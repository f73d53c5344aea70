use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::PlacesProvider;
use crate::clients::google_places::GooglePlacesClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{RestaurantCache, RestaurantSearchService, SeaOrmRestaurantCache};

/// Build a shared HTTP client for outbound API calls.
/// Reused by every client so connections are pooled.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("DineAround/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub search_service: Arc<RestaurantSearchService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.places.request_timeout_seconds)?;
        let places = Arc::new(GooglePlacesClient::with_shared_client(
            http_client,
            &config.places,
        ));

        Self::with_provider(config, places).await
    }

    /// Wires everything around an already-built places provider.
    pub async fn with_provider(
        config: Config,
        places: Arc<dyn PlacesProvider>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let cache = Arc::new(SeaOrmRestaurantCache::new(
            store.clone(),
            config.cache.ttl_hours,
        )) as Arc<dyn RestaurantCache>;

        let search_service = Arc::new(RestaurantSearchService::new(places, cache));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            search_service,
        })
    }
}
