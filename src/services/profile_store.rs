use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::{
    entity::*, query::*, sea_query::OnConflict, DatabaseConnection, TransactionTrait,
};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, Result},
    models::{
        common::{BillingPeriod, MembershipTier, PackageTier},
        purchase::{MembershipProfile, MembershipPurchase},
    },
    services::eligibility::is_available,
};

fn ensure_available(tier: PackageTier, current: MembershipTier) -> Result<()> {
    if is_available(tier, current) {
        Ok(())
    } else {
        Err(ApiError::TierUnavailable(format!(
            "{} membership already covers {}",
            current, tier
        )))
    }
}

/// User-profile store holding each user's current membership.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Current membership; users without a profile are on Standard.
    async fn profile(&self, user_id: &str) -> Result<MembershipProfile>;

    /// Record a verified purchase and make its tier the user's membership.
    ///
    /// Eligibility is checked again against the stored membership in the same
    /// atomic step as the write; a blocked tier fails with
    /// `ApiError::TierUnavailable` and changes nothing. The store transaction
    /// id is the idempotency key: applying the same transaction twice fails
    /// with `ApiError::Conflict`.
    async fn apply_purchase(&self, user_id: &str, purchase: &MembershipPurchase) -> Result<()>;

    async fn membership(&self, user_id: &str) -> Result<MembershipTier> {
        Ok(self.profile(user_id).await?.membership)
    }
}

/// Profile store kept in process memory
#[derive(Default)]
pub struct InMemoryProfileStore {
    inner: RwLock<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    profiles: HashMap<String, MembershipProfile>,
    transactions: HashSet<String>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a membership without going through a purchase
    pub async fn set_membership(
        &self,
        user_id: &str,
        membership: MembershipTier,
        period: Option<BillingPeriod>,
    ) {
        let mut state = self.inner.write().await;
        state.profiles.insert(
            user_id.to_string(),
            MembershipProfile { membership, period },
        );
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn profile(&self, user_id: &str) -> Result<MembershipProfile> {
        let state = self.inner.read().await;
        Ok(state.profiles.get(user_id).cloned().unwrap_or_default())
    }

    async fn apply_purchase(&self, user_id: &str, purchase: &MembershipPurchase) -> Result<()> {
        let mut state = self.inner.write().await;

        if state.transactions.contains(&purchase.store.transaction_id) {
            return Err(ApiError::Conflict(format!(
                "Transaction {} already processed",
                purchase.store.transaction_id
            )));
        }

        let current = state
            .profiles
            .get(user_id)
            .map(|p| p.membership)
            .unwrap_or_default();
        ensure_available(purchase.tier, current)?;

        state
            .transactions
            .insert(purchase.store.transaction_id.clone());

        state.profiles.insert(
            user_id.to_string(),
            MembershipProfile {
                membership: purchase.tier.into(),
                period: Some(purchase.period),
            },
        );

        Ok(())
    }
}

/// Profile store backed by the `profiles` and `membership_purchases` tables
pub struct DbProfileStore {
    db: DatabaseConnection,
}

impl DbProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for DbProfileStore {
    #[instrument(skip(self))]
    async fn profile(&self, user_id: &str) -> Result<MembershipProfile> {
        let Some(row) = entity::profiles::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(MembershipProfile::default());
        };

        if let Some(label) = row.membership.as_deref() {
            if MembershipTier::from_label(label).is_none() {
                warn!(user_id, label, "Unrecognized membership label, treating as Standard");
            }
        }

        Ok(MembershipProfile {
            membership: MembershipTier::from_stored(row.membership.as_deref()),
            period: row.membership_period.as_deref().and_then(BillingPeriod::from_str),
        })
    }

    #[instrument(skip(self, purchase), fields(transaction_id = %purchase.store.transaction_id))]
    async fn apply_purchase(&self, user_id: &str, purchase: &MembershipPurchase) -> Result<()> {
        let txn = self.db.begin().await?;
        let now = time::OffsetDateTime::now_utc();

        // Make sure the row exists so it can be locked
        let blank = entity::profiles::ActiveModel {
            user_id: Set(user_id.to_string()),
            membership: Set(None),
            membership_period: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        entity::profiles::Entity::insert(blank)
            .on_conflict(
                OnConflict::column(entity::profiles::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        // SELECT ... FOR UPDATE serializes purchases of the same user
        let locked = entity::profiles::Entity::find_by_id(user_id.to_string())
            .lock_exclusive()
            .one(&txn)
            .await?;
        let current = MembershipTier::from_stored(locked.and_then(|p| p.membership).as_deref());

        if let Err(e) = ensure_available(purchase.tier, current) {
            txn.rollback().await?;
            return Err(e);
        }

        let profile = entity::profiles::ActiveModel {
            user_id: Set(user_id.to_string()),
            membership: Set(Some(purchase.tier.as_str().to_string())),
            membership_period: Set(Some(purchase.period.as_str().to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        entity::profiles::Entity::insert(profile)
            .on_conflict(
                OnConflict::column(entity::profiles::Column::UserId)
                    .update_columns([
                        entity::profiles::Column::Membership,
                        entity::profiles::Column::MembershipPeriod,
                        entity::profiles::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        let store = &purchase.store;
        let record = entity::membership_purchases::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            product_id: Set(store.product_id.clone()),
            tier: Set(purchase.tier.as_str().to_string()),
            period: Set(purchase.period.as_str().to_string()),
            platform: Set(store.platform.as_str().to_string()),
            transaction_id: Set(store.transaction_id.clone()),
            original_transaction_id: Set(store.original_transaction_id.clone()),
            purchased_at: Set(store.purchased_at),
            expires_at: Set(store.expires_at),
            verified_at: Set(now),
        };

        // Insert atomically; an existing transaction_id inserts nothing
        let inserted = entity::membership_purchases::Entity::insert(record)
            .on_conflict(
                OnConflict::column(entity::membership_purchases::Column::TransactionId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        if inserted == 0 {
            txn.rollback().await?;
            return Err(ApiError::Conflict(format!(
                "Transaction {} already processed",
                store.transaction_id
            )));
        }

        txn.commit().await?;

        info!(
            "Applied membership purchase: user={}, tier={}, period={}",
            user_id,
            purchase.tier,
            purchase.period.as_str()
        );

        Ok(())
    }
}
