use serde::{Deserialize, Serialize};

use super::common::{BillingPeriod, MembershipTier, PackageTier};

/// Query string of GET /api/v1/paywall
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaywallQuery {
    #[serde(default)]
    pub visible_period: BillingPeriod,
    #[serde(default)]
    pub invisible_period: BillingPeriod,
}

/// One purchasable offer as rendered by the paywall screen.
/// Rebuilt on every request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    pub tier: PackageTier,
    pub name: String,
    pub description: String,
    pub period: BillingPeriod,
    /// None when the catalog has no offer for this tier and period
    pub product_id: Option<String>,
    /// Localized, store-formatted price (opaque)
    pub price: Option<String>,
    pub discount: Option<f64>,
    pub original_price: Option<String>,
    pub is_available: bool,
    pub features: Vec<String>,
}

/// Paywall Response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaywallResponse {
    pub success: bool,
    pub data: PaywallView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaywallView {
    pub membership: MembershipTier,
    pub visible: Vec<PackageDescriptor>,
    pub invisible: Vec<PackageDescriptor>,
}
