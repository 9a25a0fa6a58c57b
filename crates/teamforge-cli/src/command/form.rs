use std::path::PathBuf;

use chrono::Utc;
use teamforge_evaluator::lineup::Team;
use teamforge_formation::{FormationConfig, FormationSeed, TeamFormationService};
use teamforge_model::Rank;

use crate::{
    schema::formation_record::FormationRecord,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct FormArg {
    /// Candidate players (JSON array)
    players: PathBuf,
    /// Formation settings (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    team_size: Option<usize>,
    #[arg(long)]
    population_size: Option<usize>,
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long)]
    tournament_size: Option<usize>,
    #[arg(long)]
    mutation_rate: Option<f64>,
    /// Generations without improvement before stopping early
    #[arg(long)]
    early_stop_patience: Option<usize>,
    /// Evaluate fitness on all CPU cores
    #[arg(long)]
    parallel: bool,
    /// 32 hex characters; replays an earlier formation
    #[arg(long)]
    seed: Option<FormationSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FormArg) -> anyhow::Result<()> {
    let FormArg {
        players,
        config,
        team_size,
        population_size,
        generations,
        tournament_size,
        mutation_rate,
        early_stop_patience,
        parallel,
        seed,
        output,
    } = arg;

    let candidates = util::read_players_file(players)?;
    let mut config = match config {
        Some(path) => util::read_config_file(path)?,
        None => FormationConfig::default(),
    };
    if let Some(v) = team_size {
        config.team_size = *v;
    }
    if seed.is_some() {
        config.seed = *seed;
    }
    let genetic = &mut config.genetic;
    if let Some(v) = population_size {
        genetic.population_size = *v;
    }
    if let Some(v) = generations {
        genetic.generations = *v;
    }
    if let Some(v) = tournament_size {
        genetic.tournament_size = *v;
    }
    if let Some(v) = mutation_rate {
        genetic.mutation_rate = *v;
    }
    if let Some(v) = early_stop_patience {
        genetic.early_stop_patience = *v;
    }
    genetic.parallel_evaluation |= *parallel;

    eprintln!(
        "Forming teams of {} from {} candidates...",
        config.team_size,
        candidates.len()
    );
    let service = TeamFormationService::new(config.clone());
    let formation = service.form_teams(&candidates)?;

    eprintln!();
    print_team("Team A", &formation.team_a, formation.metrics.team_a_performance);
    print_team("Team B", &formation.team_b, formation.metrics.team_b_performance);
    if !formation.bench.is_empty() {
        let names: Vec<&str> = formation
            .bench
            .iter()
            .map(|p| p.player().display_name())
            .collect();
        eprintln!("Bench: {}", names.join(", "));
    }
    eprintln!();
    eprintln!("  Fitness:       {:.2}", formation.metrics.fitness);
    eprintln!("  Team balance:  {:.3}", formation.metrics.team_balance);
    eprintln!("  Role matchup:  {:.1}%", formation.metrics.role_matchup_percent);
    eprintln!(
        "  Generations:   {} ({:?})",
        formation.generations_run, formation.stop_reason
    );
    eprintln!("  Seed:          {}", formation.seed);

    let record = FormationRecord {
        formed_at: Utc::now(),
        candidate_count: candidates.len(),
        config,
        formation,
    };
    Output::save_json(&record, output.as_deref())?;

    if let Some(path) = output {
        eprintln!();
        eprintln!("Formation saved to {}", path.display());
    }

    Ok(())
}

fn print_team(label: &str, team: &Team, performance: f64) {
    eprintln!("{label} (performance {performance:.3}):");
    for member in team.members() {
        let player = member.player().player();
        let rank = player.rank.map_or("", Rank::label);
        eprintln!(
            "  {:<8} {:<20} {} {}",
            member.assigned_role().label(),
            player.display_name(),
            player.tier,
            rank
        );
    }
}
