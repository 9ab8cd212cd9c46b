//! Membership tier eligibility.
//!
//! A tier can be bought unless the user already holds it or a tier above it
//! on the same track. Standard holds nothing, so everything is open to it.

use crate::models::common::{MembershipTier, PackageTier};

/// Whether `tier` can be purchased by a user whose membership is `current`.
pub fn is_available(tier: PackageTier, current: MembershipTier) -> bool {
    match current.track() {
        Some(track) if track == tier.track() => current.rank() < tier.rank(),
        _ => true,
    }
}

/// Label-keyed variant used where tiers arrive as raw strings.
///
/// Unknown requested labels fail closed. The current label follows the
/// profile store rules: missing or unknown means Standard.
pub fn is_label_available(tier: &str, current: Option<&str>) -> bool {
    match PackageTier::from_label(tier) {
        Some(tier) => is_available(tier, MembershipTier::from_stored(current)),
        None => false,
    }
}

/// Memberships that block a purchase of `tier`.
pub fn blocking_tiers(tier: PackageTier) -> Vec<MembershipTier> {
    MembershipTier::ALL
        .into_iter()
        .filter(|current| !is_available(tier, *current))
        .collect()
}
