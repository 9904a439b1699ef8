use anyhow::Result;
use std::io::{stdout, Write};
use std::path::Path;
use tabwriter::TabWriter;

use wflop_cli::common::{write_csv_from_json, write_json, write_jsonl, OutputFormat};
use wflop_results::load_benchmark_json;

pub fn handle(input: &Path, format: &OutputFormat) -> Result<()> {
    let records = load_benchmark_json(input)?;

    match format {
        OutputFormat::Table => {
            let mut writer = TabWriter::new(stdout());
            writeln!(writer, "CONFIGURATION\tSCORE\tERROR")?;
            for record in &records {
                writeln!(
                    writer,
                    "{}\t{:.2}\t{:.2}",
                    record.label(),
                    record.primary_metric.score,
                    record.primary_metric.score_error
                )?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => write_json(&records, &mut stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(&records, &mut stdout())?,
        OutputFormat::Csv => {
            let rows: Vec<serde_json::Value> = records
                .iter()
                .map(|record| {
                    serde_json::json!({
                        "configuration": record.label(),
                        "score": record.primary_metric.score,
                        "score_error": record.primary_metric.score_error,
                    })
                })
                .collect();
            write_csv_from_json(&rows, &mut stdout())?;
        }
    }
    Ok(())
}
