//! `wflop` — WFLOP solver benchmarking toolkit.
//!
//! Generates parameterized problem-instance batches for external solvers
//! and aggregates the results they write back (benchmark timings,
//! convergence traces, summary-metric tables).

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use wflop_cli::cli::{Cli, Commands};

mod commands;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match &cli.command {
        Commands::Generate { spec, out_dir } => commands::generate::handle(spec.as_deref(), out_dir),
        Commands::Validate { spec } => commands::validate::handle(spec),
        Commands::List { spec, format } => commands::list::handle(spec.as_deref(), format),
        Commands::Results { command } => commands::results::handle(command),
        Commands::Completions { shell } => commands::completions::handle(*shell),
    }
}
