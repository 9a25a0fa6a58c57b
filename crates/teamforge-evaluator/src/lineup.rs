//! Teams with assigned roles.
//!
//! - [`Lineup`] borrows rated players and is what the optimizer scores; building one
//!   never mutates the players it points at.
//! - [`Team`] owns its members and is what a formation request returns.

use serde::Serialize;
use teamforge_model::{AssignedRole, RatedPlayer, Role};

use crate::role_assigner;

/// A team of borrowed players together with their assigned roles.
#[derive(Debug, Clone)]
pub struct Lineup<'a> {
    members: Vec<&'a RatedPlayer>,
    roles: Vec<AssignedRole>,
}

impl<'a> Lineup<'a> {
    /// Runs role assignment over `members`.
    #[must_use]
    pub fn assign(members: Vec<&'a RatedPlayer>) -> Self {
        let roles = role_assigner::assign_roles(&members);
        Self { members, roles }
    }

    /// Builds a lineup from positions in `players`.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    #[must_use]
    pub fn from_indices(players: &'a [RatedPlayer], indices: &[usize]) -> Self {
        Self::assign(indices.iter().map(|&i| &players[i]).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a RatedPlayer, AssignedRole)> + '_ {
        self.members.iter().copied().zip(self.roles.iter().copied())
    }

    /// The member playing `role`, if the lane is filled.
    #[must_use]
    pub fn member_for(&self, role: Role) -> Option<&'a RatedPlayer> {
        self.iter()
            .find(|(_, assigned)| *assigned == AssignedRole::Lane(role))
            .map(|(member, _)| member)
    }

    /// Sum of every declared role score of every member.
    ///
    /// All entries count, not only the assigned role's, so players who declare
    /// more roles contribute more.
    #[must_use]
    pub fn performance(&self) -> f64 {
        self.members.iter().map(|m| m.performance().total()).sum()
    }

    /// Clones the members into an owned [`Team`].
    #[must_use]
    pub fn to_team(&self) -> Team {
        Team {
            members: self
                .iter()
                .map(|(player, assigned_role)| TeamMember {
                    player: player.clone(),
                    assigned_role,
                })
                .collect(),
        }
    }
}

/// An owned team as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Team {
    members: Vec<TeamMember>,
}

impl Team {
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    #[must_use]
    pub fn member_for(&self, role: Role) -> Option<&TeamMember> {
        self.members
            .iter()
            .find(|m| m.assigned_role == AssignedRole::Lane(role))
    }

    /// Ids of the members in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|m| m.player.player().id.as_str())
    }
}

/// A player together with the role they were assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    #[serde(flatten)]
    player: RatedPlayer,
    assigned_role: AssignedRole,
}

impl TeamMember {
    #[must_use]
    pub fn player(&self) -> &RatedPlayer {
        &self.player
    }

    #[must_use]
    pub fn assigned_role(&self) -> AssignedRole {
        self.assigned_role
    }
}

#[cfg(test)]
mod tests {
    use teamforge_model::{Player, Tier};

    use super::*;

    fn players() -> Vec<RatedPlayer> {
        [
            ("a", Tier::Gold, vec![Role::Top]),
            ("b", Tier::Silver, vec![Role::Jungle, Role::Mid]),
            ("c", Tier::Diamond, vec![Role::Mid]),
            ("d", Tier::Iron, vec![Role::Bottom]),
            ("e", Tier::Master, vec![]),
        ]
        .into_iter()
        .map(|(id, tier, roles)| RatedPlayer::rate(Player::new(id, tier).with_roles(roles)))
        .collect()
    }

    #[test]
    fn test_from_indices_assigns_every_lane() {
        let players = players();
        let lineup = Lineup::from_indices(&players, &[0, 1, 2, 3, 4]);
        assert_eq!(lineup.len(), 5);
        for role in Role::ALL {
            assert!(lineup.member_for(role).is_some(), "{role} unfilled");
        }
        assert_eq!(lineup.member_for(Role::Support).unwrap().player().id, "e");
    }

    #[test]
    fn test_performance_sums_all_entries() {
        let players = players();
        let lineup = Lineup::from_indices(&players, &[1, 4]);
        let expected = players[1].performance().total() + players[4].performance().total();
        assert!((lineup.performance() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_assignment_leaves_players_untouched() {
        let players = players();
        let before = players.clone();
        let _ = Lineup::from_indices(&players, &[4, 3, 2, 1, 0]);
        let _ = Lineup::from_indices(&players, &[0, 2, 4]);
        assert_eq!(players, before);
    }

    #[test]
    fn test_to_team_keeps_roles() {
        let players = players();
        let lineup = Lineup::from_indices(&players, &[2, 0, 1, 3, 4]);
        let team = lineup.to_team();
        assert_eq!(team.ids().collect::<Vec<_>>(), ["c", "a", "b", "d", "e"]);
        for (member, (_, role)) in team.members().iter().zip(lineup.iter()) {
            assert_eq!(member.assigned_role(), role);
        }
        assert_eq!(team.member_for(Role::Mid).unwrap().player().player().id, "c");
    }
}
