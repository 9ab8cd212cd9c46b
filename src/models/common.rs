use serde::{Deserialize, Serialize};

/// Simple message response for lightweight endpoints (e.g., health)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Progression a tier belongs to. Tiers only dominate each other within a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// Standard -> Gold -> VIP
    Visible,
    /// Standard -> Ghost -> Phantom -> Celebrity
    Invisible,
}

/// A user's current membership. Serialized with the exact labels the
/// mobile client and the profile store use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MembershipTier {
    #[default]
    Standard,
    Gold,
    #[serde(rename = "VIP")]
    Vip,
    Ghost,
    Phantom,
    Celebrity,
}

impl MembershipTier {
    pub const ALL: [MembershipTier; 6] = [
        Self::Standard,
        Self::Gold,
        Self::Vip,
        Self::Ghost,
        Self::Phantom,
        Self::Celebrity,
    ];

    /// Labels are case-sensitive: they are lookup keys, not user input.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Standard" => Some(Self::Standard),
            "Gold" => Some(Self::Gold),
            "VIP" => Some(Self::Vip),
            "Ghost" => Some(Self::Ghost),
            "Phantom" => Some(Self::Phantom),
            "Celebrity" => Some(Self::Celebrity),
            _ => None,
        }
    }

    /// Resolve the `membership` attribute of a stored profile.
    /// Missing and unrecognized values both mean Standard.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(Self::from_label).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Gold => "Gold",
            Self::Vip => "VIP",
            Self::Ghost => "Ghost",
            Self::Phantom => "Phantom",
            Self::Celebrity => "Celebrity",
        }
    }

    /// Standard sits at the bottom of both tracks and belongs to neither.
    pub fn track(&self) -> Option<Track> {
        match self {
            Self::Standard => None,
            Self::Gold | Self::Vip => Some(Track::Visible),
            Self::Ghost | Self::Phantom | Self::Celebrity => Some(Track::Invisible),
        }
    }

    /// Position within the track, Standard being 0.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Standard => 0,
            Self::Gold | Self::Ghost => 1,
            Self::Vip | Self::Phantom => 2,
            Self::Celebrity => 3,
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tier that can be bought from the paywall (every tier but Standard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageTier {
    Gold,
    #[serde(rename = "VIP")]
    Vip,
    Ghost,
    Phantom,
    Celebrity,
}

impl PackageTier {
    /// Packages shown in the main section of the paywall, in display order.
    pub const VISIBLE: [PackageTier; 2] = [Self::Gold, Self::Vip];

    /// Packages shown in the "invisible mode" section, in display order.
    pub const INVISIBLE: [PackageTier; 3] = [Self::Ghost, Self::Phantom, Self::Celebrity];

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Gold" => Some(Self::Gold),
            "VIP" => Some(Self::Vip),
            "Ghost" => Some(Self::Ghost),
            "Phantom" => Some(Self::Phantom),
            "Celebrity" => Some(Self::Celebrity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        MembershipTier::from(*self).as_str()
    }

    pub fn track(&self) -> Track {
        match self {
            Self::Gold | Self::Vip => Track::Visible,
            Self::Ghost | Self::Phantom | Self::Celebrity => Track::Invisible,
        }
    }

    pub fn rank(&self) -> u8 {
        MembershipTier::from(*self).rank()
    }
}

impl From<PackageTier> for MembershipTier {
    fn from(tier: PackageTier) -> Self {
        match tier {
            PackageTier::Gold => Self::Gold,
            PackageTier::Vip => Self::Vip,
            PackageTier::Ghost => Self::Ghost,
            PackageTier::Phantom => Self::Phantom,
            PackageTier::Celebrity => Self::Celebrity,
        }
    }
}

impl std::fmt::Display for PackageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing period of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Week,
    #[default]
    Month,
}

impl BillingPeriod {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// IAP Platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IAPPlatform {
    Apple,
    Google,
}

impl IAPPlatform {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "apple" => Some(Self::Apple),
            "google" => Some(Self::Google),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Google => "google",
        }
    }
}
