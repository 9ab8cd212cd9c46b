// Integration tests

mod api_test;
mod concurrency_test;
mod profile_store_test;

use std::sync::Arc;

use async_trait::async_trait;
use paywall::{
    models::{
        common::{BillingPeriod, IAPPlatform, PackageTier},
        purchase::StorePurchase,
    },
    services::{catalog::CatalogProduct, ConfigCatalog, InMemoryProfileStore, StoreClient},
    AppState, Result,
};

/// Store client that accepts every receipt and names the transaction after it
pub struct AcceptingStore;

#[async_trait]
impl StoreClient for AcceptingStore {
    async fn verify_purchase(
        &self,
        platform: IAPPlatform,
        receipt: &str,
        product_id: &str,
    ) -> Result<StorePurchase> {
        let now = time::OffsetDateTime::now_utc();
        Ok(StorePurchase {
            transaction_id: format!("txn-{}", receipt),
            original_transaction_id: None,
            product_id: product_id.to_string(),
            platform,
            purchased_at: now,
            expires_at: Some(now + time::Duration::days(30)),
        })
    }
}

pub fn test_catalog() -> Vec<CatalogProduct> {
    let product = |id: &str, tier, period, price: &str| CatalogProduct {
        product_id: id.to_string(),
        tier,
        period,
        localized_price: price.to_string(),
        discount: 0.5,
    };

    vec![
        product("com.flame.gold.week", PackageTier::Gold, BillingPeriod::Week, "2,99 €"),
        product("com.flame.gold.month", PackageTier::Gold, BillingPeriod::Month, "9,99 €"),
        product("com.flame.vip.week", PackageTier::Vip, BillingPeriod::Week, "4,99 €"),
        product("com.flame.vip.month", PackageTier::Vip, BillingPeriod::Month, "14,99 €"),
        product("com.flame.ghost.month", PackageTier::Ghost, BillingPeriod::Month, "€5.99"),
        product("com.flame.phantom.month", PackageTier::Phantom, BillingPeriod::Month, "€8.99"),
        product("com.flame.celebrity.month", PackageTier::Celebrity, BillingPeriod::Month, "€19.99"),
    ]
}

pub fn test_state() -> (AppState, Arc<InMemoryProfileStore>) {
    let profiles = Arc::new(InMemoryProfileStore::new());
    let state = AppState::from_parts(
        Arc::new(ConfigCatalog::from_products(test_catalog())),
        Arc::new(AcceptingStore),
        profiles.clone(),
    );
    (state, profiles)
}
