use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{form::FormArg, rate::RateArg};

mod form;
mod rate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log per-generation progress (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Split candidates into two balanced teams
    Form(#[clap(flatten)] FormArg),
    /// Show skill factor and role performance of each candidate
    Rate(#[clap(flatten)] RateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match args.mode {
        Mode::Form(arg) => form::run(&arg)?,
        Mode::Rate(arg) => rate::run(&arg)?,
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "teamforge=debug"
        } else {
            "teamforge=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
