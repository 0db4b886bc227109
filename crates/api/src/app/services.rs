//! Service wiring: picks the catalog store and builds the services on top of it.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use lumina_infra::seed::seed_demo_catalog;
use lumina_infra::{
    CatalogError, CatalogQueryService, CatalogSettings, CatalogStore, InMemoryCatalogStore,
    PlacementService, PostgresCatalogStore, StoreError,
};

use crate::config::AppConfig;

/// Store handle shared by both services.
pub type SharedStore = Arc<dyn CatalogStore>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(#[from] StoreError),

    #[error("seeding failed: {0}")]
    Seed(#[from] CatalogError),
}

pub struct AppServices {
    pub placement: PlacementService<SharedStore>,
    pub query: CatalogQueryService<SharedStore>,
}

impl AppServices {
    pub fn new(store: SharedStore, settings: CatalogSettings) -> Self {
        Self {
            placement: PlacementService::new(store.clone(), settings),
            query: CatalogQueryService::new(store, settings.name_match),
        }
    }

    /// Services over a fresh in-memory store (dev/test).
    pub fn in_memory(settings: CatalogSettings) -> Self {
        Self::new(Arc::new(InMemoryCatalogStore::new()), settings)
    }
}

pub async fn build_services(config: &AppConfig) -> Result<AppServices, StartupError> {
    let settings = config.catalog_settings();

    let services = match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresCatalogStore::connect(url).await?;
            info!("using postgres catalog store");
            AppServices::new(Arc::new(store), settings)
        }
        None => {
            info!("DATABASE_URL not set; using in-memory catalog store");
            AppServices::in_memory(settings)
        }
    };

    if config.seed {
        let report = seed_demo_catalog(&services.placement).await?;
        info!(
            categories = report.categories,
            products = report.products,
            "seed finished"
        );
    }

    Ok(services)
}
