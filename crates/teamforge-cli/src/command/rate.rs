use std::path::PathBuf;

use teamforge_formation::sort_candidates;
use teamforge_model::{RatedPlayer, Role};

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RateArg {
    /// Candidate players (JSON array)
    players: PathBuf,
    /// Keep the input order instead of strongest first
    #[arg(long)]
    unsorted: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RateArg) -> anyhow::Result<()> {
    let RateArg {
        players,
        unsorted,
        output,
    } = arg;

    let mut candidates = util::read_players_file(players)?;
    if !unsorted {
        sort_candidates(&mut candidates);
    }
    let rated: Vec<RatedPlayer> = candidates.into_iter().map(RatedPlayer::rate).collect();

    eprint!("{:<20} {:<12} {:>6}", "player", "tier", "skill");
    for role in Role::ALL {
        eprint!(" {:>7}", role.label());
    }
    eprintln!(" {:>7}", "forced");
    for player in &rated {
        let info = player.player();
        let tier = match info.rank {
            Some(rank) => format!("{} {}", info.tier, rank.label()),
            None => info.tier.to_string(),
        };
        eprint!(
            "{:<20} {:<12} {:>6.3}",
            info.display_name(),
            tier,
            player.skill_factor()
        );
        let performance = player.performance();
        for role in Role::ALL {
            eprint!(" {}", format_score(performance.get(role)));
        }
        eprintln!(" {}", format_score(performance.forced()));
    }

    Output::save_json(&rated, output.as_deref())?;
    Ok(())
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| format!("{:>7}", "-"), |s| format!("{s:>7.3}"))
}
