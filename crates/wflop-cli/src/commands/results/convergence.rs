use anyhow::Result;
use std::io::{stdout, Write};
use std::path::Path;
use tabwriter::TabWriter;

use wflop_cli::common::{write_csv_from_json, write_json, write_jsonl, OutputFormat};
use wflop_results::scan_convergence_dir;

pub fn handle(dir: &Path, format: &OutputFormat) -> Result<()> {
    let groups = scan_convergence_dir(dir)?;

    match format {
        OutputFormat::Table => {
            let mut writer = TabWriter::new(stdout());
            writeln!(writer, "PROBLEM\tALGORITHM\tSAMPLES\tFINAL BEST")?;
            for group in &groups {
                for entry in &group.series {
                    let final_best = entry
                        .series
                        .points
                        .last()
                        .map(|point| format!("{:.4}", point.best_fitness))
                        .unwrap_or_else(|| "--".to_string());
                    writeln!(
                        writer,
                        "{}\t{}\t{}\t{}",
                        group.problem,
                        entry.algorithm,
                        entry.series.points.len(),
                        final_best
                    )?;
                }
            }
            writer.flush()?;
        }
        OutputFormat::Json => write_json(&groups, &mut stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(&groups, &mut stdout())?,
        OutputFormat::Csv => {
            let rows: Vec<serde_json::Value> = groups
                .iter()
                .flat_map(|group| {
                    group.series.iter().map(|entry| {
                        serde_json::json!({
                            "problem": group.problem,
                            "algorithm": entry.algorithm,
                            "samples": entry.series.points.len(),
                            "final_best": entry.series.points.last().map(|p| p.best_fitness),
                        })
                    })
                })
                .collect();
            write_csv_from_json(&rows, &mut stdout())?;
        }
    }
    Ok(())
}
