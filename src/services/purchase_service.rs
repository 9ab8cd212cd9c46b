use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    error::{ApiError, Result},
    models::purchase::{MembershipPurchase, PurchaseRequest},
    services::{
        catalog::ProductCatalog,
        eligibility::is_available,
        profile_store::ProfileStore,
        store_client::{hash_receipt, StoreClient},
    },
};

/// Turns a store receipt into a membership change
pub struct PurchaseService {
    catalog: Arc<dyn ProductCatalog>,
    store: Arc<dyn StoreClient>,
    profiles: Arc<dyn ProfileStore>,
}

impl PurchaseService {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        store: Arc<dyn StoreClient>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            catalog,
            store,
            profiles,
        }
    }

    /// Verify a purchase of a catalog product and apply it to the user's profile
    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    pub async fn purchase(
        &self,
        user_id: &str,
        request: &PurchaseRequest,
    ) -> Result<MembershipPurchase> {
        let product = self
            .catalog
            .find(&request.product_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Unknown product {}", request.product_id)))?;

        let current = self.profiles.membership(user_id).await?;
        if !is_available(product.tier, current) {
            return Err(ApiError::TierUnavailable(format!(
                "{} membership already covers {}",
                current, product.tier
            )));
        }

        let receipt_hash = hash_receipt(&request.receipt);
        let store_purchase = self
            .store
            .verify_purchase(request.platform, &request.receipt, &product.product_id)
            .await?;

        if store_purchase.product_id != product.product_id {
            return Err(ApiError::InvalidReceipt(format!(
                "Receipt is for {}, not {}",
                store_purchase.product_id, product.product_id
            )));
        }

        if let Some(expires_at) = store_purchase.expires_at {
            if expires_at <= time::OffsetDateTime::now_utc() {
                return Err(ApiError::InvalidReceipt(format!(
                    "Subscription expired at {}",
                    expires_at
                )));
            }
        }

        let purchase = MembershipPurchase {
            tier: product.tier,
            period: product.period,
            store: store_purchase,
        };
        self.profiles.apply_purchase(user_id, &purchase).await?;

        info!(
            "Membership purchased: user={}, {} -> {}, receipt={}",
            user_id,
            current,
            purchase.tier,
            &receipt_hash[..12]
        );

        Ok(purchase)
    }
}
