//! Formation request orchestration.

use std::cmp::Reverse;

use rand::Rng as _;
use serde::Serialize;
use teamforge_evaluator::{
    lineup::{Lineup, Team},
    split_evaluator::{BalancedSplitEvaluator, SplitEvaluator},
};
use teamforge_genetic::genetic::{GenerationSummary, GeneticOptimizer, StopReason};
use teamforge_model::{Player, RatedPlayer};

use crate::{FormationConfig, FormationError, FormationSeed};

/// Summary figures of the chosen split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormationMetrics {
    pub team_a_performance: f64,
    pub team_b_performance: f64,
    /// In `[0, 1]`.
    pub team_balance: f64,
    /// Lane matchup quality in percent (0–100).
    pub role_matchup_percent: f64,
    /// In `[0, 100]`.
    pub fitness: f64,
}

/// Result of a successful formation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formation {
    pub team_a: Team,
    pub team_b: Team,
    /// Candidates left out of both teams.
    pub bench: Vec<RatedPlayer>,
    pub metrics: FormationMetrics,
    /// Seed that reproduces this formation.
    pub seed: FormationSeed,
    pub generations_run: usize,
    pub stop_reason: StopReason,
    #[serde(skip)]
    pub history: Vec<GenerationSummary>,
}

/// Entry point for forming two balanced teams.
///
/// The service owns its configuration and fitness function. Each call to
/// [`form_teams`](Self::form_teams) works on its own copy of the candidates and
/// its own random number generator, so one service can serve many requests.
#[derive(Debug, Clone)]
pub struct TeamFormationService<E = BalancedSplitEvaluator> {
    config: FormationConfig,
    evaluator: E,
}

impl TeamFormationService {
    #[must_use]
    pub fn new(config: FormationConfig) -> Self {
        Self::with_evaluator(config, BalancedSplitEvaluator::default())
    }
}

impl Default for TeamFormationService {
    fn default() -> Self {
        Self::new(FormationConfig::default())
    }
}

impl<E> TeamFormationService<E>
where
    E: SplitEvaluator,
{
    #[must_use]
    pub fn with_evaluator(config: FormationConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }

    #[must_use]
    pub fn config(&self) -> &FormationConfig {
        &self.config
    }

    /// Splits `players` into two teams using the configured seed, or a fresh
    /// random one.
    pub fn form_teams(&self, players: &[Player]) -> Result<Formation, FormationError> {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        self.form_teams_with_seed(players, seed)
    }

    /// Splits `players` into two teams, drawing all randomness from `seed`.
    ///
    /// Fails with [`FormationError::InsufficientPlayers`] before doing any work if
    /// fewer than `2 * team_size` candidates are given. `players` is never
    /// modified; the returned teams hold copies.
    pub fn form_teams_with_seed(
        &self,
        players: &[Player],
        seed: FormationSeed,
    ) -> Result<Formation, FormationError> {
        let team_size = self.config.team_size;
        let required = self.config.required_players();
        if players.len() < required {
            return Err(FormationError::InsufficientPlayers {
                team_size,
                required,
                available: players.len(),
            });
        }

        tracing::info!(
            candidates = players.len(),
            team_size,
            %seed,
            "forming teams"
        );

        let mut candidates = players.to_vec();
        sort_candidates(&mut candidates);
        let rated: Vec<RatedPlayer> = candidates.into_iter().map(RatedPlayer::rate).collect();

        let mut rng = seed.rng();
        let optimizer =
            GeneticOptimizer::new(&rated, team_size, &self.evaluator, &self.config.genetic);
        let outcome = optimizer.run(&mut rng);

        let chromosome = outcome.best.chromosome();
        let (a_indices, b_indices) = chromosome.teams(team_size);
        let team_a = Lineup::from_indices(&rated, a_indices);
        let team_b = Lineup::from_indices(&rated, b_indices);
        let score = self.evaluator.score_split(&team_a, &team_b);
        let bench = chromosome
            .bench(team_size)
            .iter()
            .map(|&i| rated[i].clone())
            .collect();

        let formation = Formation {
            team_a: team_a.to_team(),
            team_b: team_b.to_team(),
            bench,
            metrics: FormationMetrics {
                team_a_performance: score.team_a_performance,
                team_b_performance: score.team_b_performance,
                team_balance: score.team_balance,
                role_matchup_percent: score.role_matchup * 100.0,
                fitness: score.fitness,
            },
            seed,
            generations_run: outcome.history.len(),
            stop_reason: outcome.stop_reason,
            history: outcome.history,
        };

        tracing::info!(
            fitness = format_args!("{:.2}", formation.metrics.fitness),
            generations = formation.generations_run,
            stop_reason = ?formation.stop_reason,
            "teams formed"
        );
        Ok(formation)
    }
}

/// Forms teams with the default fitness function.
///
/// # Examples
///
/// ```
/// use teamforge_formation::{FormationConfig, FormationSeed, form_teams};
/// use teamforge_model::{Player, Role, Tier};
///
/// let players: Vec<Player> = Tier::RANKED
///     .into_iter()
///     .enumerate()
///     .map(|(i, tier)| Player::new(format!("p{i}"), tier).with_roles(Role::ALL))
///     .collect();
///
/// let config = FormationConfig::default().with_seed(FormationSeed::from_u128(7));
/// let formation = form_teams(&players, &config).unwrap();
/// assert_eq!(formation.team_a.members().len(), 5);
/// assert_eq!(formation.team_b.members().len(), 5);
/// assert!(formation.bench.is_empty());
/// ```
pub fn form_teams(
    players: &[Player],
    config: &FormationConfig,
) -> Result<Formation, FormationError> {
    TeamFormationService::new(config.clone()).form_teams(players)
}

/// Orders candidates strongest first: tier, then division (absent last), then
/// win rate.
///
/// The order only decides which index each candidate gets in a chromosome.
pub fn sort_candidates(players: &mut [Player]) {
    players.sort_by(|a, b| {
        (Reverse(a.tier), Reverse(a.rank))
            .cmp(&(Reverse(b.tier), Reverse(b.rank)))
            .then_with(|| b.win_rate.total_cmp(&a.win_rate))
    });
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use teamforge_model::{AssignedRole, Rank, Role, Tier};

    use super::*;

    fn ladder_players() -> Vec<Player> {
        Tier::RANKED
            .into_iter()
            .enumerate()
            .map(|(i, tier)| {
                let player = Player::new(format!("p{i}"), tier).with_roles(Role::ALL);
                if tier.has_divisions() {
                    player.with_rank(Rank::V)
                } else {
                    player
                }
            })
            .collect()
    }

    fn seeded(seed: u128) -> TeamFormationService {
        let config = FormationConfig::default().with_seed(FormationSeed::from_u128(seed));
        TeamFormationService::new(config)
    }

    fn assert_complete(team: &Team) {
        assert_eq!(team.members().len(), Role::LEN);
        let lanes: HashSet<_> = team
            .members()
            .iter()
            .filter_map(|m| m.assigned_role().lane())
            .collect();
        assert_eq!(lanes.len(), Role::LEN);
    }

    #[test]
    fn test_ladder_pool_is_balanced() {
        let formation = seeded(1).form_teams(&ladder_players()).unwrap();
        assert_complete(&formation.team_a);
        assert_complete(&formation.team_b);
        assert!(formation.bench.is_empty());

        let metrics = formation.metrics;
        assert!(metrics.fitness >= 95.5, "fitness {}", metrics.fitness);
        assert!(metrics.role_matchup_percent >= 85.0, "{metrics:?}");
        assert!(metrics.team_balance > 0.9, "{metrics:?}");
    }

    #[test]
    fn test_nine_players_is_not_enough() {
        let players = &ladder_players()[..9];
        let err = seeded(1).form_teams(players).unwrap_err();
        assert_eq!(
            err,
            FormationError::InsufficientPlayers {
                team_size: 5,
                required: 10,
                available: 9,
            }
        );
        assert_eq!(err.missing(), 1);
        assert!(err.to_string().contains("1 more"), "{err}");
    }

    #[test]
    fn test_same_seed_same_formation() {
        let players = ladder_players();
        let first = seeded(99).form_teams(&players).unwrap();
        let second = seeded(99).form_teams(&players).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed, FormationSeed::from_u128(99));
    }

    #[test]
    fn test_random_seed_is_reported() {
        let service = TeamFormationService::default();
        let players = ladder_players();
        let formation = service.form_teams(&players).unwrap();
        let replay = service.form_teams_with_seed(&players, formation.seed).unwrap();
        assert_eq!(formation, replay);
    }

    #[test]
    fn test_extra_candidates_are_benched() {
        let mut players = ladder_players();
        players.extend(
            [Tier::Gold, Tier::Silver, Tier::Diamond]
                .into_iter()
                .enumerate()
                .map(|(i, tier)| Player::new(format!("extra{i}"), tier).with_roles([Role::Mid])),
        );
        let formation = seeded(3).form_teams(&players).unwrap();
        assert_complete(&formation.team_a);
        assert_complete(&formation.team_b);
        assert_eq!(formation.bench.len(), 3);

        let ids: HashSet<&str> = formation
            .team_a
            .ids()
            .chain(formation.team_b.ids())
            .chain(formation.bench.iter().map(|p| p.player().id.as_str()))
            .collect();
        assert_eq!(ids.len(), players.len());
    }

    #[test]
    fn test_players_without_roles_are_placed() {
        let players: Vec<Player> = (0..10)
            .map(|i| Player::new(format!("p{i}"), Tier::Platinum))
            .collect();
        let formation = seeded(4).form_teams(&players).unwrap();
        assert_complete(&formation.team_a);
        assert_complete(&formation.team_b);
        assert!(
            formation
                .team_a
                .members()
                .iter()
                .all(|m| m.assigned_role() != AssignedRole::Forced)
        );
        assert_eq!(formation.metrics.team_balance, 1.0);
    }

    #[test]
    fn test_generation_history_is_reported() {
        let formation = seeded(5).form_teams(&ladder_players()).unwrap();
        assert_eq!(formation.history.len(), formation.generations_run);
        let last = formation.history.last().unwrap();
        assert!((last.best_fitness - formation.metrics.fitness).abs() < 1e-9);
    }

    #[test]
    fn test_unbounded_generations_end_on_patience() {
        let mut config = FormationConfig::default().with_seed(FormationSeed::from_u128(6));
        config.genetic.generations = usize::MAX;
        config.genetic.early_stop_patience = 3;
        let formation = form_teams(&ladder_players(), &config).unwrap();
        assert!(formation.stop_reason.is_early_stop());
        assert_eq!(formation.history.len(), formation.generations_run);
    }

    #[test]
    fn test_sort_candidates() {
        let mut players = vec![
            Player::new("gold-ii", Tier::Gold).with_rank(Rank::II),
            Player::new("default", Tier::Default).with_win_rate(90.0),
            Player::new("master", Tier::Master),
            Player::new("gold-i-low", Tier::Gold).with_rank(Rank::I).with_win_rate(40.0),
            Player::new("gold-i-high", Tier::Gold).with_rank(Rank::I).with_win_rate(60.0),
            Player::new("gold", Tier::Gold),
        ];
        sort_candidates(&mut players);
        let ids: Vec<&str> = players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            ["master", "gold-i-high", "gold-i-low", "gold-ii", "gold", "default"]
        );
    }

    #[test]
    fn test_formation_serializes_roles() {
        let formation = seeded(6).form_teams(&ladder_players()).unwrap();
        let json = serde_json::to_value(&formation).unwrap();
        let member = &json["team_a"][0];
        assert!(member["assigned_role"].is_string());
        assert!(member["id"].is_string());
        assert!(json["metrics"]["role_matchup_percent"].is_number());
        assert_eq!(json["seed"], formation.seed.to_string());
        assert!(json.get("history").is_none());
    }
}
