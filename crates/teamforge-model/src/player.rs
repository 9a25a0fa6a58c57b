use serde::{Deserialize, Deserializer, Serialize};

use crate::{Rank, Role, RolePerformance, Tier, skill};

/// A candidate player as supplied by the caller.
///
/// Field aliases accept the upstream record names (`user_id`, `game_name`,
/// `role`, `wr`, `manual_tier`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(alias = "user_id")]
    pub id: String,
    #[serde(default, alias = "game_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub tier: Tier,
    /// Division within the tier; absent at master and above.
    #[serde(
        default,
        deserialize_with = "deserialize_rank",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<Rank>,
    /// Admin-set skill on a 0–10 scale that supersedes the tier.
    #[serde(
        default,
        alias = "manual_tier",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_override: Option<f64>,
    /// Preferred roles, most preferred first.
    #[serde(default, alias = "role")]
    pub roles: Vec<Role>,
    /// Recent win rate in percent (0–100).
    #[serde(default, alias = "wr")]
    pub win_rate: f64,
}

fn deserialize_rank<'de, D>(deserializer: D) -> Result<Option<Rank>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(Rank::from_label))
}

impl Player {
    #[must_use]
    pub fn new(id: impl Into<String>, tier: Tier) -> Self {
        Self {
            id: id.into(),
            name: None,
            tier,
            rank: None,
            manual_override: None,
            roles: vec![],
            win_rate: 0.0,
        }
    }

    #[must_use]
    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }

    #[must_use]
    pub fn with_roles<I>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        self.roles = roles.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_manual_override(mut self, value: f64) -> Self {
        self.manual_override = Some(value);
        self
    }

    #[must_use]
    pub fn with_win_rate(mut self, win_rate: f64) -> Self {
        self.win_rate = win_rate;
        self
    }

    /// Name for display, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A player with its skill factor and role performance precomputed.
///
/// Rating happens once per formation request; the optimizer only reads these
/// values afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedPlayer {
    #[serde(flatten)]
    player: Player,
    skill_factor: f64,
    performance: RolePerformance,
}

impl RatedPlayer {
    #[must_use]
    pub fn rate(player: Player) -> Self {
        let skill_factor = skill::skill_factor(player.tier, player.manual_override);
        let performance = skill::role_performance(skill_factor, &player.roles);
        Self {
            player,
            skill_factor,
            performance,
        }
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn skill_factor(&self) -> f64 {
        self.skill_factor
    }

    #[must_use]
    pub fn performance(&self) -> &RolePerformance {
        &self.performance
    }

    #[must_use]
    pub fn into_player(self) -> Player {
        self.player
    }
}

impl AsRef<RolePerformance> for RatedPlayer {
    fn as_ref(&self) -> &RolePerformance {
        &self.performance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_upstream_record() {
        let json = r#"{
            "user_id": "player1",
            "game_name": "Player1",
            "tier": "platinum",
            "rank": "II",
            "wr": 56,
            "role": ["mid", "top", "Jungle"]
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.id, "player1");
        assert_eq!(player.display_name(), "Player1");
        assert_eq!(player.tier, Tier::Platinum);
        assert_eq!(player.rank, Some(Rank::II));
        assert_eq!(player.roles, [Role::Mid, Role::Top, Role::Jungle]);
        assert_eq!(player.win_rate, 56.0);
        assert_eq!(player.manual_override, None);
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let player: Player =
            serde_json::from_str(r#"{"id": "x", "tier": "mystery", "rank": "VII"}"#).unwrap();
        assert_eq!(player.tier, Tier::Default);
        assert_eq!(player.rank, None);
        assert!(player.roles.is_empty());
        assert_eq!(player.display_name(), "x");
    }

    #[test]
    fn test_deserialize_rejects_unknown_role() {
        let result = serde_json::from_str::<Player>(r#"{"id": "x", "roles": ["carry"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rate_uses_manual_override() {
        let rated = RatedPlayer::rate(
            Player::new("p", Tier::Iron)
                .with_manual_override(10.0)
                .with_roles([Role::Top]),
        );
        let challenger = RatedPlayer::rate(Player::new("c", Tier::Challenger));
        assert!((rated.skill_factor() - challenger.skill_factor()).abs() < 1e-12);
    }

    #[test]
    fn test_rank_does_not_change_skill_factor() {
        let low = RatedPlayer::rate(Player::new("a", Tier::Gold).with_rank(Rank::V));
        let high = RatedPlayer::rate(Player::new("b", Tier::Gold).with_rank(Rank::I));
        assert_eq!(low.skill_factor(), high.skill_factor());
    }
}
