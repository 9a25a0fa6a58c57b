//! Skill model: ladder standing to per-role performance.
//!
//! The model works in two steps:
//!
//! 1. [`skill_factor`] maps a player's tier (or an admin-set manual override) to a
//!    scalar skill factor in `[0.0, 1.45]`
//! 2. [`role_performance`] spreads that factor over the player's ordered role
//!    preferences, producing a [`RolePerformance`] table
//!
//! # Formulas
//!
//! ```text
//! skill_factor   = 1.0 + (manual_override / 10) * 0.45        (override present)
//!                = TIER_FACTOR[tier]                          (otherwise)
//!
//! performance[i] = skill_factor * 0.75 + (1 - i * 5 / 100) * 0.25
//! forced         = skill_factor * 0.75                        (fewer than 5 roles)
//! ```
//!
//! Skill dominates with 75% of the weight. The remaining 25% rewards playing a
//! preferred role, losing 5 percentage points per step down the preference list.
//! The `forced` entry is the zero-preference floor used when a player ends up in
//! a lane they never asked for.
//!
//! Division (rank) does not adjust the skill factor here; only the tier does.
//! All arithmetic is plain `f64` without intermediate rounding.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap as _};

use crate::{AssignedRole, Role, Tier};

/// Weight of the skill factor in a role performance score.
pub const SKILL_WEIGHT: f64 = 0.75;
/// Weight of the preference component in a role performance score.
pub const PREFERENCE_WEIGHT: f64 = 0.25;
/// Percentage points lost per step down the preference list.
pub const PREFERENCE_PENALTY_STEP: f64 = 5.0;
/// Upper bound of the manual override scale.
pub const MANUAL_OVERRIDE_MAX: f64 = 10.0;

/// Base skill factor of a tier.
#[must_use]
pub const fn tier_factor(tier: Tier) -> f64 {
    match tier {
        Tier::Default => 0.0,
        Tier::Iron => 1.0,
        Tier::Bronze => 1.05,
        Tier::Silver => 1.10,
        Tier::Gold => 1.15,
        Tier::Platinum => 1.20,
        Tier::Emerald => 1.25,
        Tier::Diamond => 1.30,
        Tier::Master => 1.35,
        Tier::Grandmaster => 1.40,
        Tier::Challenger => 1.45,
    }
}

/// Computes a player's skill factor.
///
/// A manual override (0–10 scale, clamped) takes precedence over the tier and is
/// scaled linearly onto the tier range, so an override of 10 equals challenger.
///
/// # Examples
///
/// ```
/// use teamforge_model::{Tier, skill};
///
/// assert_eq!(skill::skill_factor(Tier::Gold, None), 1.15);
/// assert_eq!(skill::skill_factor(Tier::Default, None), 0.0);
/// assert_eq!(skill::skill_factor(Tier::Iron, Some(0.0)), 1.0);
/// ```
#[must_use]
pub fn skill_factor(tier: Tier, manual_override: Option<f64>) -> f64 {
    match manual_override {
        Some(value) => {
            let value = value.clamp(0.0, MANUAL_OVERRIDE_MAX);
            1.0 + (value / MANUAL_OVERRIDE_MAX) * 0.45
        }
        None => tier_factor(tier),
    }
}

/// Builds the role performance table for a player.
///
/// Roles after the first occurrence of a duplicate are ignored so scores keep
/// decreasing with preference order.
#[must_use]
pub fn role_performance(skill_factor: f64, ordered_roles: &[Role]) -> RolePerformance {
    let mut performance = RolePerformance::default();
    let mut declared = 0;
    for &role in ordered_roles {
        if performance.get(role).is_some() {
            continue;
        }
        performance.lanes[role.index()] = Some(preference_score(skill_factor, declared));
        declared += 1;
    }
    if declared < Role::LEN {
        performance.forced = Some(skill_factor * SKILL_WEIGHT);
    }
    performance
}

#[expect(clippy::cast_precision_loss)]
fn preference_score(skill_factor: f64, preference_index: usize) -> f64 {
    let penalty = preference_index as f64 * PREFERENCE_PENALTY_STEP;
    skill_factor * SKILL_WEIGHT + (1.0 - penalty / 100.0) * PREFERENCE_WEIGHT
}

/// Performance scores of one player, keyed by lane plus the `forced` slot.
///
/// A missing lane entry means the player did not declare that role; it is
/// "unavailable" rather than zero.
#[derive(Default, Clone, Copy, PartialEq)]
pub struct RolePerformance {
    lanes: [Option<f64>; Role::LEN],
    forced: Option<f64>,
}

impl RolePerformance {
    /// Score for a lane, or `None` if the player did not declare it.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<f64> {
        self.lanes[role.index()]
    }

    #[must_use]
    pub fn forced(&self) -> Option<f64> {
        self.forced
    }

    #[must_use]
    pub fn get_assigned(&self, role: AssignedRole) -> Option<f64> {
        match role {
            AssignedRole::Lane(role) => self.get(role),
            AssignedRole::Forced => self.forced,
        }
    }

    /// Iterates declared entries: lanes in standard order, then `forced`.
    pub fn iter(&self) -> impl Iterator<Item = (AssignedRole, f64)> + '_ {
        Role::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|p| (AssignedRole::Lane(role), p)))
            .chain(self.forced.map(|p| (AssignedRole::Forced, p)))
    }

    /// Sum of every entry, including `forced`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, p)| p).sum()
    }

    #[must_use]
    pub fn declared_lanes(&self) -> usize {
        self.lanes.iter().flatten().count()
    }
}

impl AsRef<RolePerformance> for RolePerformance {
    fn as_ref(&self) -> &RolePerformance {
        self
    }
}

impl fmt::Debug for RolePerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(role, p)| (role.label(), p)))
            .finish()
    }
}

impl Serialize for RolePerformance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (role, p) in self.iter() {
            map.serialize_entry(role.label(), &p)?;
        }
        map.end()
    }
}
