use anyhow::Result;
use std::path::Path;

use wflop_scenarios::{load_spec_from_path, validate};

pub fn handle(spec: &Path) -> Result<()> {
    let set = load_spec_from_path(spec)?;
    validate(&set)?;
    println!("Generation spec validated successfully");
    Ok(())
}
