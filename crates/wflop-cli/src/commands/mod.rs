use anyhow::Result;
use std::path::Path;
use wflop_scenarios::{load_spec_from_path, GenerationSpec};

pub mod completions;
pub mod generate;
pub mod list;
pub mod results;
pub mod validate;

/// Load the generation spec, or fall back to the built-in parameter space.
pub fn load_spec_or_default(path: Option<&Path>) -> Result<GenerationSpec> {
    match path {
        Some(path) => load_spec_from_path(path),
        None => Ok(GenerationSpec::default()),
    }
}
