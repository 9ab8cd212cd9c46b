use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{BillingPeriod, IAPPlatform, MembershipTier, PackageTier};

/// Purchase Request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    #[validate(length(min = 1, max = 200))]
    pub product_id: String,
    pub platform: IAPPlatform,
    #[validate(length(min = 10, max = 100000))]
    pub receipt: String,
}

/// Purchase Response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub success: bool,
    pub data: PurchaseData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseData {
    pub membership: MembershipTier,
    pub period: BillingPeriod,
    pub product_id: String,
    pub transaction_id: String,
    pub purchased_at: String,       // RFC 3339
    pub expires_at: Option<String>, // RFC 3339
}

/// Membership Response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub success: bool,
    pub data: MembershipProfile,
}

/// Current membership of a user as held by the profile store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipProfile {
    pub membership: MembershipTier,
    pub period: Option<BillingPeriod>,
}

/// Purchase as reported by the platform store after receipt verification
#[derive(Debug, Clone)]
pub struct StorePurchase {
    pub transaction_id: String,
    pub original_transaction_id: Option<String>,
    pub product_id: String,
    pub platform: IAPPlatform,
    pub purchased_at: time::OffsetDateTime,
    pub expires_at: Option<time::OffsetDateTime>,
}

/// A verified purchase resolved against the catalog, ready to be applied
#[derive(Debug, Clone)]
pub struct MembershipPurchase {
    pub tier: PackageTier,
    pub period: BillingPeriod,
    pub store: StorePurchase,
}
