//! Subscription tiers and feature gating.
//!
//! Gating is a lookup table: a [`Tier`] maps to a fixed [`Permissions`]
//! record. Nothing here has side effects, and unrecognized tier strings
//! fall back to [`Tier::Free`], the most restrictive set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GatingError, ValidationError};

/// Subscription level held by the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// No subscription.
    #[default]
    Free,
    /// Entry paid tier.
    Basic,
    /// Mid paid tier.
    Premium,
    /// Top tier.
    Elite,
}

impl Tier {
    /// All tiers, cheapest first.
    pub const ALL: [Self; 4] = [Self::Free, Self::Basic, Self::Premium, Self::Elite];

    /// Returns the lowercase wire name of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Elite => "elite",
        }
    }

    /// Parses a tier name, falling back to `Free` for anything unrecognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use kindling::Tier;
    ///
    /// assert_eq!(Tier::parse_or_free("Elite"), Tier::Elite);
    /// assert_eq!(Tier::parse_or_free("platinum"), Tier::Free);
    /// ```
    #[must_use]
    pub fn parse_or_free(value: &str) -> Self {
        value.parse().unwrap_or(Self::Free)
    }

    /// Returns true for any paid tier.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// The permission set unlocked by this tier.
    #[must_use]
    pub const fn permissions(self) -> Permissions {
        match self {
            Self::Free => Permissions {
                see_likes: false,
                super_like: false,
                messaging: true,
                calling: false,
                filters: false,
                rewind: false,
                video_chat: false,
                date_planner: false,
                blasts: false,
                calendar_sync: false,
                growth_highlight: false,
            },
            Self::Basic => Permissions {
                see_likes: true,
                super_like: true,
                messaging: true,
                calling: false,
                filters: true,
                rewind: true,
                video_chat: false,
                date_planner: false,
                blasts: false,
                calendar_sync: true,
                growth_highlight: true,
            },
            Self::Premium => Permissions {
                see_likes: true,
                super_like: true,
                messaging: true,
                calling: false,
                filters: true,
                rewind: true,
                video_chat: true,
                date_planner: true,
                blasts: false,
                calendar_sync: true,
                growth_highlight: true,
            },
            Self::Elite => Permissions {
                see_likes: true,
                super_like: true,
                messaging: true,
                calling: true,
                filters: true,
                rewind: true,
                video_chat: true,
                date_planner: true,
                blasts: true,
                calendar_sync: true,
                growth_highlight: true,
            },
        }
    }

    /// Checks a single feature, producing a gating error on denial.
    ///
    /// The error's upgrade tier is the cheapest tier that unlocks `feature`.
    ///
    /// # Errors
    ///
    /// Returns [`GatingError::FeatureLocked`] when the tier lacks `feature`.
    pub fn require(self, feature: Feature) -> Result<(), GatingError> {
        if self.permissions().allows(feature) {
            return Ok(());
        }
        Err(GatingError::FeatureLocked {
            feature,
            tier: self,
            upgrade_to: feature.minimum_tier(),
        })
    }

    /// Invites granted when switching to this tier.
    #[must_use]
    pub const fn invites(self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Basic => 1,
            Self::Premium => 3,
            Self::Elite => 25,
        }
    }

    /// Monthly price in US cents.
    #[must_use]
    pub const fn monthly_price_cents(self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Basic => 1_499,
            Self::Premium => 4_999,
            Self::Elite => 99_999,
        }
    }

    /// Points awarded for a positively judged icebreaker answer.
    #[must_use]
    pub const fn icebreaker_reward(self) -> u32 {
        if self.is_paid() {
            20
        } else {
            10
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            "elite" => Ok(Self::Elite),
            _ => Err(ValidationError::UnknownTier {
                value: s.to_string(),
            }),
        }
    }
}

/// A single gated capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// See the list of profiles that liked you.
    SeeLikes,
    /// Send a super like.
    SuperLike,
    /// Send messages.
    Messaging,
    /// Phone and video calls from a conversation.
    Calling,
    /// Discovery filters.
    Filters,
    /// Go back to the previously swiped profile.
    Rewind,
    /// Standalone video chat.
    VideoChat,
    /// Virtual date planner.
    DatePlanner,
    /// Super like blast and AI DM blast.
    Blasts,
    /// Calendar sync for planned dates.
    CalendarSync,
    /// Growth goals highlighted on the profile.
    GrowthHighlight,
}

impl Feature {
    /// All features in declaration order.
    pub const ALL: [Self; 11] = [
        Self::SeeLikes,
        Self::SuperLike,
        Self::Messaging,
        Self::Calling,
        Self::Filters,
        Self::Rewind,
        Self::VideoChat,
        Self::DatePlanner,
        Self::Blasts,
        Self::CalendarSync,
        Self::GrowthHighlight,
    ];

    /// Cheapest tier that unlocks this feature.
    #[must_use]
    pub fn minimum_tier(self) -> Tier {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.permissions().allows(self))
            .unwrap_or(Tier::Elite)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SeeLikes => "Seeing who liked you",
            Self::SuperLike => "Super likes",
            Self::Messaging => "Messaging",
            Self::Calling => "Calling",
            Self::Filters => "Filters",
            Self::Rewind => "Rewind",
            Self::VideoChat => "Video chat",
            Self::DatePlanner => "Date planner",
            Self::Blasts => "Blasts",
            Self::CalendarSync => "Calendar sync",
            Self::GrowthHighlight => "Growth highlight",
        };
        f.write_str(name)
    }
}

/// Boolean feature flags derived from a [`Tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Permissions {
    pub see_likes: bool,
    pub super_like: bool,
    pub messaging: bool,
    pub calling: bool,
    pub filters: bool,
    pub rewind: bool,
    pub video_chat: bool,
    pub date_planner: bool,
    pub blasts: bool,
    pub calendar_sync: bool,
    pub growth_highlight: bool,
}

impl Permissions {
    /// Returns whether `feature` is unlocked.
    #[must_use]
    pub const fn allows(&self, feature: Feature) -> bool {
        match feature {
            Feature::SeeLikes => self.see_likes,
            Feature::SuperLike => self.super_like,
            Feature::Messaging => self.messaging,
            Feature::Calling => self.calling,
            Feature::Filters => self.filters,
            Feature::Rewind => self.rewind,
            Feature::VideoChat => self.video_chat,
            Feature::DatePlanner => self.date_planner,
            Feature::Blasts => self.blasts,
            Feature::CalendarSync => self.calendar_sync,
            Feature::GrowthHighlight => self.growth_highlight,
        }
    }

    /// Unlocked features in declaration order.
    #[must_use]
    pub fn unlocked(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.allows(*feature))
            .collect()
    }
}

/// A purchasable plan: tier, price and the features it unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub tier: Tier,
    pub price_cents: u32,
    pub features: Vec<Feature>,
}

impl SubscriptionPlan {
    /// Builds the plan for `tier`.
    #[must_use]
    pub fn for_tier(tier: Tier) -> Self {
        Self {
            tier,
            price_cents: tier.monthly_price_cents(),
            features: tier.permissions().unlocked(),
        }
    }

    /// The paid plans offered by the upgrade screen.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        Tier::ALL
            .into_iter()
            .filter(|tier| tier.is_paid())
            .map(Self::for_tier)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_are_deterministic() {
        for tier in Tier::ALL {
            assert_eq!(tier.permissions(), tier.permissions());
            assert_eq!(Tier::parse_or_free(tier.as_str()).permissions(), tier.permissions());
        }
    }

    #[test]
    fn test_unknown_tier_is_most_restrictive() {
        let unknown = Tier::parse_or_free("platinum").permissions();
        assert_eq!(unknown, Tier::Free.permissions());
        for tier in Tier::ALL {
            let unlocked = tier.permissions().unlocked();
            assert!(unknown.unlocked().iter().all(|f| unlocked.contains(f)));
        }
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert_eq!("Premium ".parse::<Tier>(), Ok(Tier::Premium));
        assert!(matches!(
            "gold".parse::<Tier>(),
            Err(ValidationError::UnknownTier { .. })
        ));
    }

    #[test]
    fn test_permission_table() {
        // Columns: free, basic, premium, elite.
        let table = [
            (Feature::SeeLikes, [false, true, true, true]),
            (Feature::SuperLike, [false, true, true, true]),
            (Feature::Messaging, [true, true, true, true]),
            (Feature::Calling, [false, false, false, true]),
            (Feature::Filters, [false, true, true, true]),
            (Feature::Rewind, [false, true, true, true]),
            (Feature::VideoChat, [false, false, true, true]),
            (Feature::DatePlanner, [false, false, true, true]),
            (Feature::Blasts, [false, false, false, true]),
            (Feature::CalendarSync, [false, true, true, true]),
            (Feature::GrowthHighlight, [false, true, true, true]),
        ];
        assert_eq!(table.len(), Feature::ALL.len());

        for (feature, row) in table {
            for (tier, expected) in Tier::ALL.into_iter().zip(row) {
                assert_eq!(
                    tier.permissions().allows(feature),
                    expected,
                    "{feature} on {tier}"
                );
                assert_eq!(tier.require(feature).is_ok(), expected, "{feature} on {tier}");
            }
        }
    }

    #[test]
    fn test_calling_is_elite_only() {
        assert!(Tier::Premium.require(Feature::Calling).is_err());
        assert!(Tier::Elite.require(Feature::Calling).is_ok());
        assert_eq!(Feature::Calling.minimum_tier(), Tier::Elite);
    }

    #[test]
    fn test_denial_offers_cheapest_unlocking_tier() {
        assert_eq!(Tier::Free.require(Feature::SuperLike).unwrap_err().upgrade_to(), Tier::Basic);
        assert_eq!(Tier::Free.require(Feature::Calling).unwrap_err().upgrade_to(), Tier::Elite);
        assert_eq!(Tier::Basic.require(Feature::DatePlanner).unwrap_err().upgrade_to(), Tier::Premium);

        for tier in Tier::ALL {
            for feature in Feature::ALL {
                let Err(err) = tier.require(feature) else {
                    continue;
                };
                let offered = err.upgrade_to();
                assert!(offered > tier);
                assert!(offered.permissions().allows(feature));
                assert!(Tier::ALL
                    .into_iter()
                    .filter(|t| *t < offered)
                    .all(|t| !t.permissions().allows(feature)));
            }
        }
    }

    #[test]
    fn test_higher_tiers_never_lose_features() {
        for pair in Tier::ALL.windows(2) {
            let lower = pair[0].permissions().unlocked();
            let higher = pair[1].permissions().unlocked();
            assert!(lower.iter().all(|f| higher.contains(f)));
        }
    }

    #[test]
    fn test_invites_and_rewards() {
        assert_eq!(Tier::Free.invites(), 0);
        assert_eq!(Tier::Elite.invites(), 25);
        assert_eq!(Tier::Free.icebreaker_reward(), 10);
        assert_eq!(Tier::Basic.icebreaker_reward(), 20);
    }

    #[test]
    fn test_catalog_lists_paid_plans() {
        let catalog = SubscriptionPlan::catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].tier, Tier::Basic);
        assert_eq!(catalog[2].price_cents, 99_999);
        assert!(catalog[2].features.contains(&Feature::Blasts));
    }
}
