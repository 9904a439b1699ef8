use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::common::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "wflop", author, version, about = "WFLOP solver benchmarking toolkit", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate problem-instance artifacts and a manifest
    Generate {
        /// Generation spec (YAML or JSON); omit for the built-in parameter space
        #[arg(long)]
        spec: Option<PathBuf>,
        /// Directory receiving the instance artifacts
        #[arg(short, long)]
        out_dir: PathBuf,
    },
    /// Validate a generation spec without writing anything
    Validate {
        /// Generation spec file
        #[arg(long)]
        spec: PathBuf,
    },
    /// List the instances a spec resolves to
    List {
        /// Generation spec (YAML or JSON); omit for the built-in parameter space
        #[arg(long)]
        spec: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Inspect solver result artifacts
    Results {
        #[command(subcommand)]
        command: ResultsCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ResultsCommands {
    /// Summarize a benchmark result list
    Benchmark {
        /// Benchmark results JSON file
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Group convergence traces by problem identity
    Convergence {
        /// Directory containing convergence_<problem>_<algorithm>.csv traces
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Pivot the summary table into a problem × algorithm matrix
    Table {
        /// Summary CSV (problem, algorithm, one column per metric)
        #[arg(short, long)]
        input: PathBuf,
        /// Metric key to pivot; defaults to the first built-in metric
        #[arg(long)]
        metric: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}
