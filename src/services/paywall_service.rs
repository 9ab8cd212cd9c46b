use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    error::Result,
    models::{
        common::{BillingPeriod, MembershipTier, PackageTier},
        paywall::{PackageDescriptor, PaywallQuery, PaywallView},
    },
    services::{
        catalog::ProductCatalog, eligibility::is_available, pricing::derive_original_price,
    },
};

/// Display copy of a package
struct PackageCopy {
    name: &'static str,
    description: &'static str,
    features: &'static [&'static str],
}

fn package_copy(tier: PackageTier) -> PackageCopy {
    match tier {
        PackageTier::Gold => PackageCopy {
            name: "Gold",
            description: "Stand out and match faster",
            features: &[
                "See who liked you",
                "Unlimited likes",
                "5 Super Likes per week",
                "Rewind your last swipe",
            ],
        },
        PackageTier::Vip => PackageCopy {
            name: "VIP",
            description: "The full experience, first in line",
            features: &[
                "Everything in Gold",
                "Priority placement in discovery",
                "Message before matching",
                "Unlimited Super Likes",
            ],
        },
        PackageTier::Ghost => PackageCopy {
            name: "Ghost",
            description: "Browse without being seen",
            features: &["Browse profiles invisibly", "Hide your distance"],
        },
        PackageTier::Phantom => PackageCopy {
            name: "Phantom",
            description: "Decide who gets to see you",
            features: &[
                "Everything in Ghost",
                "Only people you like can see you",
                "Hide your last active status",
            ],
        },
        PackageTier::Celebrity => PackageCopy {
            name: "Celebrity",
            description: "Total privacy for public faces",
            features: &[
                "Everything in Phantom",
                "Hidden from search and shared links",
                "Verified profile badge",
                "Dedicated support",
            ],
        },
    }
}

/// Assembles the package descriptors the paywall screen renders
pub struct PaywallService {
    catalog: Arc<dyn ProductCatalog>,
}

impl PaywallService {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// Build both package sets for a user holding `current`
    #[instrument(skip(self))]
    pub async fn build(&self, current: MembershipTier, query: PaywallQuery) -> Result<PaywallView> {
        let mut visible = Vec::with_capacity(PackageTier::VISIBLE.len());
        for tier in PackageTier::VISIBLE {
            visible.push(self.describe(tier, query.visible_period, current).await?);
        }

        let mut invisible = Vec::with_capacity(PackageTier::INVISIBLE.len());
        for tier in PackageTier::INVISIBLE {
            invisible.push(self.describe(tier, query.invisible_period, current).await?);
        }

        Ok(PaywallView {
            membership: current,
            visible,
            invisible,
        })
    }

    async fn describe(
        &self,
        tier: PackageTier,
        period: BillingPeriod,
        current: MembershipTier,
    ) -> Result<PackageDescriptor> {
        let copy = package_copy(tier);
        let offer = self.catalog.find_offer(tier, period).await?;

        if offer.is_none() {
            debug!("No catalog offer for {} ({})", tier, period.as_str());
        }

        let original_price = offer
            .as_ref()
            .and_then(|p| derive_original_price(&p.localized_price, p.discount));

        Ok(PackageDescriptor {
            tier,
            name: copy.name.to_string(),
            description: copy.description.to_string(),
            period,
            product_id: offer.as_ref().map(|p| p.product_id.clone()),
            price: offer.as_ref().map(|p| p.localized_price.clone()),
            discount: offer.as_ref().map(|p| p.discount),
            original_price,
            is_available: is_available(tier, current),
            features: copy.features.iter().map(|f| f.to_string()).collect(),
        })
    }
}
