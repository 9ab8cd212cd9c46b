use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::CatalogConfig,
    error::Result,
    models::common::{BillingPeriod, PackageTier},
};

/// A store product backing one package offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub product_id: String,
    pub tier: PackageTier,
    pub period: BillingPeriod,
    pub localized_price: String,
    /// Multiplier applied to the original price (0.5 = fifty percent off)
    #[serde(default = "full_price")]
    pub discount: f64,
}

fn full_price() -> f64 {
    1.0
}

/// Source of the products offered on the paywall.
///
/// Injected into the services so they can be exercised without a store
/// connection.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn products(&self) -> Result<Vec<CatalogProduct>>;

    async fn find(&self, product_id: &str) -> Result<Option<CatalogProduct>> {
        Ok(self
            .products()
            .await?
            .into_iter()
            .find(|p| p.product_id == product_id))
    }

    /// Offer for a tier and billing period, if the store sells one.
    async fn find_offer(
        &self,
        tier: PackageTier,
        period: BillingPeriod,
    ) -> Result<Option<CatalogProduct>> {
        Ok(self
            .products()
            .await?
            .into_iter()
            .find(|p| p.tier == tier && p.period == period))
    }
}

/// Catalog declared in configuration
pub struct ConfigCatalog {
    products: Vec<CatalogProduct>,
}

impl ConfigCatalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self::from_products(config.products.clone())
    }

    pub fn from_products(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductCatalog for ConfigCatalog {
    async fn products(&self) -> Result<Vec<CatalogProduct>> {
        Ok(self.products.clone())
    }
}
