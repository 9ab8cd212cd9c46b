use crate::{
    config::Config,
    services::{
        AppleStoreClient, ConfigCatalog, DbProfileStore, PaywallService, ProductCatalog,
        ProfileStore, PurchaseService, StoreClient,
    },
};
use migration::MigratorTrait;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub paywall_service: Arc<PaywallService>,
    pub purchase_service: Arc<PurchaseService>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        // Connect to database
        let db = sea_orm::Database::connect(&config.database.url).await?;

        if config.database.run_migrations {
            migration::Migrator::up(&db, None).await?;
            tracing::info!("Applied pending migrations");
        }

        let catalog: Arc<dyn ProductCatalog> = Arc::new(ConfigCatalog::new(&config.catalog));
        let store: Arc<dyn StoreClient> = Arc::new(AppleStoreClient::new(&config.iap));
        let profiles: Arc<dyn ProfileStore> = Arc::new(DbProfileStore::new(db));

        Ok(Self::from_parts(catalog, store, profiles))
    }

    /// Assemble state from already-built collaborators
    pub fn from_parts(
        catalog: Arc<dyn ProductCatalog>,
        store: Arc<dyn StoreClient>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            paywall_service: Arc::new(PaywallService::new(catalog.clone())),
            purchase_service: Arc::new(PurchaseService::new(catalog, store, profiles.clone())),
            profiles,
        }
    }
}
