use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse skill bracket on the ranked ladder.
///
/// Variants are declared from lowest to highest, so the derived ordering ranks
/// players. [`Tier::Default`] stands for an unranked or unrecognised tier and
/// sorts below everything else.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Tier {
    #[default]
    Default,
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub const RANKED: [Self; 10] = [
        Self::Iron,
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Platinum,
        Self::Emerald,
        Self::Diamond,
        Self::Master,
        Self::Grandmaster,
        Self::Challenger,
    ];

    /// Resolves a tier label, ignoring ASCII case.
    ///
    /// Unrecognised labels resolve to [`Tier::Default`] instead of failing.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::RANKED
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Iron => "iron",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Emerald => "emerald",
            Self::Diamond => "diamond",
            Self::Master => "master",
            Self::Grandmaster => "grandmaster",
            Self::Challenger => "challenger",
        }
    }

    /// Position on the ladder used for lane matchups: iron is 0, challenger is 9.
    ///
    /// [`Tier::Default`] shares iron's position.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        match self {
            Self::Default | Self::Iron => 0,
            Self::Bronze => 1,
            Self::Silver => 2,
            Self::Gold => 3,
            Self::Platinum => 4,
            Self::Emerald => 5,
            Self::Diamond => 6,
            Self::Master => 7,
            Self::Grandmaster => 8,
            Self::Challenger => 9,
        }
    }

    /// Whether divisions exist in this tier.
    #[must_use]
    pub const fn has_divisions(self) -> bool {
        !matches!(self, Self::Master | Self::Grandmaster | Self::Challenger)
    }
}

impl From<String> for Tier {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<&str> for Tier {
    fn from(value: &str) -> Self {
        Self::from_label(value)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Division within a tier. `I` is the highest division, `V` the lowest.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rank {
    V,
    IV,
    III,
    II,
    I,
}

impl Rank {
    pub const ALL: [Self; 5] = [Self::V, Self::IV, Self::III, Self::II, Self::I];

    /// Parses a roman-numeral division label, ignoring ASCII case.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|rank| rank.label().eq_ignore_ascii_case(label))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::V => "V",
            Self::IV => "IV",
            Self::III => "III",
            Self::II => "II",
            Self::I => "I",
        }
    }

    /// V is 0, I is 4.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordinal distance between iron V and challenger I.
pub const MAX_LADDER_SPREAD: u32 = ladder_ordinal(Tier::Challenger, Some(Rank::I));

/// Combines tier and division into one ladder position: `tier * 5 + rank`.
///
/// An absent division counts as V.
#[must_use]
pub const fn ladder_ordinal(tier: Tier, rank: Option<Rank>) -> u32 {
    let rank = match rank {
        Some(rank) => rank.ordinal(),
        None => 0,
    };
    tier.ordinal() * 5 + rank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tier_resolves_to_default() {
        assert_eq!(Tier::from_label("wood"), Tier::Default);
        assert_eq!(Tier::from_label(""), Tier::Default);
        assert_eq!(Tier::from_label("default"), Tier::Default);
        assert_eq!(Tier::from_label("Platinum"), Tier::Platinum);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Default < Tier::Iron);
        assert!(Tier::Grandmaster < Tier::Challenger);
        assert!(Tier::RANKED.is_sorted());
    }

    #[test]
    fn test_tier_deserialize_is_lossy() {
        let tier: Tier = serde_json::from_str("\"GOLD\"").unwrap();
        assert_eq!(tier, Tier::Gold);
        let tier: Tier = serde_json::from_str("\"unranked\"").unwrap();
        assert_eq!(tier, Tier::Default);
        assert_eq!(serde_json::to_string(&Tier::Emerald).unwrap(), "\"emerald\"");
    }

    #[test]
    fn test_rank_labels() {
        assert_eq!(Rank::from_label("iv"), Some(Rank::IV));
        assert_eq!(Rank::from_label("VI"), None);
        assert_eq!(Rank::I.ordinal(), 4);
        assert_eq!(Rank::V.ordinal(), 0);
    }

    #[test]
    fn test_ladder_ordinal() {
        assert_eq!(ladder_ordinal(Tier::Iron, Some(Rank::V)), 0);
        assert_eq!(ladder_ordinal(Tier::Default, None), 0);
        assert_eq!(ladder_ordinal(Tier::Gold, Some(Rank::II)), 18);
        assert_eq!(ladder_ordinal(Tier::Master, None), 35);
        assert_eq!(MAX_LADDER_SPREAD, 49);
    }
}
