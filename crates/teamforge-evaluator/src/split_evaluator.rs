//! Split evaluation: the fitness function of team formation.
//!
//! A split is two lineups drawn from the same candidate pool. Its fitness combines
//! two balance measures:
//!
//! ```text
//! fitness = (0.7 * team_balance + 0.3 * role_matchup) * 100
//!
//! where:
//!   team_balance = 1 - |perf_a - perf_b| / (2 * max(perf_a, perf_b))
//!                  (1 when both performances are 0)
//!   perf_x       = Σ over members Σ over their role performance entries
//!   role_matchup = 1 - avg_lane_gap / 49
//!   avg_lane_gap = mean over filled lanes of |ladder_ordinal(a) - ladder_ordinal(b)|
//!                  (role_matchup is 0 when no lane is filled on both sides)
//! ```
//!
//! - **Team balance** compares the aggregate strength of both teams.
//! - **Role matchup** compares the two players facing each other in every lane,
//!   using ladder position (tier × 5 + division) rather than skill factor.
//!
//! Fitness is in `[0, 100]`, higher is better, and evaluation is deterministic.

use std::fmt;

use serde::Serialize;
use teamforge_model::{MAX_LADDER_SPREAD, RatedPlayer, Role, ladder_ordinal};

use crate::lineup::Lineup;

/// Weight of team balance in the default fitness.
pub const TEAM_BALANCE_WEIGHT: f64 = 0.7;
/// Weight of role matchups in the default fitness.
pub const ROLE_MATCHUP_WEIGHT: f64 = 0.3;

/// All measures computed for one split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitScore {
    pub team_a_performance: f64,
    pub team_b_performance: f64,
    /// In `[0, 1]`.
    pub team_balance: f64,
    /// In `[0, 1]`.
    pub role_matchup: f64,
    /// In `[0, 100]`.
    pub fitness: f64,
}

/// Scores candidate team splits for the optimizer.
pub trait SplitEvaluator: fmt::Debug + Send + Sync {
    /// Scores two already-assigned lineups.
    fn score_split(&self, team_a: &Lineup<'_>, team_b: &Lineup<'_>) -> SplitScore;

    /// Assigns roles to the two teams given by index and returns the fitness.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds for `players`.
    fn evaluate_split(&self, players: &[RatedPlayer], team_a: &[usize], team_b: &[usize]) -> f64 {
        let team_a = Lineup::from_indices(players, team_a);
        let team_b = Lineup::from_indices(players, team_b);
        self.score_split(&team_a, &team_b).fitness
    }
}

/// Default fitness: 70% team balance, 30% role matchups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancedSplitEvaluator {
    pub team_balance_weight: f64,
    pub role_matchup_weight: f64,
}

impl Default for BalancedSplitEvaluator {
    fn default() -> Self {
        Self {
            team_balance_weight: TEAM_BALANCE_WEIGHT,
            role_matchup_weight: ROLE_MATCHUP_WEIGHT,
        }
    }
}

impl SplitEvaluator for BalancedSplitEvaluator {
    fn score_split(&self, team_a: &Lineup<'_>, team_b: &Lineup<'_>) -> SplitScore {
        let team_a_performance = team_a.performance();
        let team_b_performance = team_b.performance();
        let team_balance = team_balance_score(team_a_performance, team_b_performance);
        let role_matchup = role_matchup_score(team_a, team_b);
        let fitness = (self.team_balance_weight * team_balance
            + self.role_matchup_weight * role_matchup)
            * 100.0;
        SplitScore {
            team_a_performance,
            team_b_performance,
            team_balance,
            role_matchup,
            fitness,
        }
    }
}

/// Balance of two aggregate performances, 1.0 meaning identical.
///
/// # Examples
///
/// ```
/// use teamforge_evaluator::split_evaluator::team_balance_score;
///
/// assert_eq!(team_balance_score(12.5, 12.5), 1.0);
/// assert_eq!(team_balance_score(0.0, 0.0), 1.0);
/// assert_eq!(team_balance_score(10.0, 5.0), 0.75);
/// ```
#[must_use]
pub fn team_balance_score(perf_a: f64, perf_b: f64) -> f64 {
    let max_diff = perf_a.max(perf_b) * 2.0;
    let max_diff = if max_diff == 0.0 { 1.0 } else { max_diff };
    1.0 - (perf_a - perf_b).abs() / max_diff
}

/// How evenly matched the opposing players of every lane are, 1.0 meaning
/// identical ladder positions in all lanes.
#[must_use]
pub fn role_matchup_score(team_a: &Lineup<'_>, team_b: &Lineup<'_>) -> f64 {
    let gaps: Vec<u32> = Role::ALL
        .into_iter()
        .filter_map(|role| {
            let a = team_a.member_for(role)?.player();
            let b = team_b.member_for(role)?.player();
            Some(ladder_ordinal(a.tier, a.rank).abs_diff(ladder_ordinal(b.tier, b.rank)))
        })
        .collect();
    if gaps.is_empty() {
        return 0.0;
    }
    let avg_gap = f64::from(gaps.iter().sum::<u32>()) / f64::from(lane_count(&gaps));
    1.0 - avg_gap / f64::from(MAX_LADDER_SPREAD)
}

#[expect(clippy::cast_possible_truncation)]
fn lane_count(gaps: &[u32]) -> u32 {
    // at most Role::LEN
    gaps.len() as u32
}

#[cfg(test)]
mod tests {
    use teamforge_model::{Player, Rank, Tier};

    use super::*;

    fn rated(id: &str, tier: Tier, rank: Option<Rank>, roles: &[Role]) -> RatedPlayer {
        let mut player = Player::new(id, tier).with_roles(roles.iter().copied());
        player.rank = rank;
        RatedPlayer::rate(player)
    }

    fn ladder_pool() -> Vec<RatedPlayer> {
        Tier::RANKED
            .into_iter()
            .enumerate()
            .map(|(i, tier)| rated(&format!("p{i}"), tier, None, &Role::ALL))
            .collect()
    }

    #[test]
    fn test_balance_equal_performance() {
        assert_eq!(team_balance_score(3.0, 3.0), 1.0);
        assert_eq!(team_balance_score(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_balance_is_symmetric() {
        assert_eq!(team_balance_score(8.0, 6.0), team_balance_score(6.0, 8.0));
        assert_eq!(team_balance_score(8.0, 0.0), 0.5);
    }

    #[test]
    fn test_mirrored_split_is_perfect() {
        let players: Vec<_> = (0..10)
            .map(|i| rated(&format!("p{i}"), Tier::Gold, Some(Rank::II), &Role::ALL))
            .collect();
        let a = Lineup::from_indices(&players, &[0, 1, 2, 3, 4]);
        let b = Lineup::from_indices(&players, &[5, 6, 7, 8, 9]);
        let score = BalancedSplitEvaluator::default().score_split(&a, &b);
        assert_eq!(score.team_balance, 1.0);
        assert_eq!(score.role_matchup, 1.0);
        assert!((score.fitness - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_matchup_extremes() {
        let players = [
            rated("low", Tier::Iron, Some(Rank::V), &[Role::Top]),
            rated("high", Tier::Challenger, None, &[Role::Top]),
        ];
        let a = Lineup::from_indices(&players, &[0]);
        let b = Lineup::from_indices(&players, &[1]);
        // challenger without a division sits at 45, iron V at 0
        let expected = 1.0 - 45.0 / 49.0;
        assert!((role_matchup_score(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_matchup_without_common_lanes() {
        let players = [
            rated("a", Tier::Gold, None, &[Role::Top]),
            rated("b", Tier::Gold, None, &[Role::Mid]),
        ];
        let a = Lineup::from_indices(&players, &[0]);
        let b = Lineup::from_indices(&players, &[1]);
        assert_eq!(role_matchup_score(&a, &b), 0.0);

        let empty = Lineup::from_indices(&players, &[]);
        assert_eq!(role_matchup_score(&empty, &empty), 0.0);
    }

    #[test]
    fn test_fitness_bounds_over_many_splits() {
        let players = ladder_pool();
        let evaluator = BalancedSplitEvaluator::default();
        // every rotation and a few interleavings
        let mut order: Vec<usize> = (0..players.len()).collect();
        for _ in 0..players.len() {
            order.rotate_left(1);
            let fitness = evaluator.evaluate_split(&players, &order[..5], &order[5..]);
            assert!((0.0..=100.0).contains(&fitness), "fitness {fitness}");
            order.swap(1, 7);
        }
    }

    #[test]
    fn test_interleaved_beats_stacked() {
        let players = ladder_pool();
        let evaluator = BalancedSplitEvaluator::default();
        let stacked = evaluator.evaluate_split(&players, &[0, 1, 2, 3, 4], &[5, 6, 7, 8, 9]);
        let interleaved = evaluator.evaluate_split(&players, &[0, 2, 4, 6, 8], &[1, 3, 5, 7, 9]);
        assert!(interleaved > stacked);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let players = ladder_pool();
        let evaluator = BalancedSplitEvaluator::default();
        let first = evaluator.evaluate_split(&players, &[9, 0, 4, 5, 2], &[1, 3, 6, 7, 8]);
        let second = evaluator.evaluate_split(&players, &[9, 0, 4, 5, 2], &[1, 3, 6, 7, 8]);
        assert_eq!(first, second);
    }
}
