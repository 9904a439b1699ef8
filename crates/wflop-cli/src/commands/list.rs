use anyhow::Result;
use std::io::{stdout, Write};
use std::path::Path;
use tabwriter::TabWriter;

use wflop_scenarios::resolve_instances;

use crate::commands::load_spec_or_default;
use wflop_cli::common::{write_csv_from_json, write_json, write_jsonl, OutputFormat};

pub fn handle(spec: Option<&Path>, format: &OutputFormat) -> Result<()> {
    let spec = load_spec_or_default(spec)?;
    let resolved = resolve_instances(&spec)?;

    let rows: Vec<serde_json::Value> = resolved
        .iter()
        .map(|item| {
            serde_json::json!({
                "identity": item.identity,
                "dimension": item.dimension,
                "turbines": item.instance.number_of_turbines,
                "density": item.density,
                "scenario": item.scenario,
            })
        })
        .collect();

    match format {
        OutputFormat::Table => {
            let mut writer = TabWriter::new(stdout());
            writeln!(writer, "IDENTITY\tDIMENSION\tTURBINES\tDENSITY\tSCENARIO")?;
            for item in &resolved {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}",
                    item.identity,
                    item.dimension,
                    item.instance.number_of_turbines,
                    item.density,
                    item.scenario
                )?;
            }
            writer.flush()?;
            println!("{} instances", resolved.len());
        }
        OutputFormat::Json => write_json(&rows, &mut stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(&rows, &mut stdout())?,
        OutputFormat::Csv => write_csv_from_json(&rows, &mut stdout())?,
    }
    Ok(())
}
