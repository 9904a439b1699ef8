pub mod cli;
pub mod common;

pub use cli::{Cli, Commands, ResultsCommands};
pub use common::OutputFormat;
