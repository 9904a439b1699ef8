use anyhow::Result;
use wflop_cli::cli::ResultsCommands;

pub mod benchmark;
pub mod convergence;
pub mod table;

pub fn handle(command: &ResultsCommands) -> Result<()> {
    match command {
        ResultsCommands::Benchmark { input, format } => benchmark::handle(input, format),
        ResultsCommands::Convergence { dir, format } => convergence::handle(dir, format),
        ResultsCommands::Table {
            input,
            metric,
            format,
        } => table::handle(input, metric.as_deref(), format),
    }
}
