use anyhow::Result;
use std::path::Path;

use wflop_scenarios::materialize_instances;

use crate::commands::load_spec_or_default;

pub fn handle(spec: Option<&Path>, out_dir: &Path) -> Result<()> {
    let spec = load_spec_or_default(spec)?;
    let artifacts = materialize_instances(&spec, out_dir)?;
    // discovery feed: one entry per artifact for downstream tooling
    for artifact in &artifacts {
        println!(
            "{}",
            serde_json::json!({ "id": artifact.id, "path": artifact.path })
        );
    }
    println!(
        "Materialized {} problem instances into {}",
        artifacts.len(),
        out_dir.display()
    );
    Ok(())
}
