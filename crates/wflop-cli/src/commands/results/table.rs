use anyhow::{bail, Result};
use std::io::{stdout, Write};
use std::path::Path;
use tabwriter::TabWriter;

use wflop_cli::common::{write_json, OutputFormat};
use wflop_results::{
    default_metrics, load_summary_csv, pivot, MetricConfig, MetricOrientation, PivotTable,
};

pub fn handle(input: &Path, metric: Option<&str>, format: &OutputFormat) -> Result<()> {
    let rows = load_summary_csv(input)?;
    let metrics = default_metrics();
    let config = match metric {
        Some(key) => metrics
            .iter()
            .find(|m| m.key == key)
            .cloned()
            .unwrap_or_else(|| {
                tracing::warn!(
                    metric = key,
                    "metric has no built-in configuration; assuming maximize, 3 decimals"
                );
                MetricConfig {
                    key: key.to_string(),
                    label: key.to_string(),
                    precision: 3,
                    orientation: MetricOrientation::Maximize,
                }
            }),
        None => metrics[0].clone(),
    };
    let table = pivot(&rows, &config)?;

    match format {
        OutputFormat::Table => print_table(&table)?,
        OutputFormat::Json => write_json(&table, &mut stdout(), true)?,
        OutputFormat::Csv => print_csv(&table)?,
        OutputFormat::Jsonl => bail!("jsonl output is not supported for pivot tables"),
    }
    Ok(())
}

/// Aligned text rendering; best cells are marked `*`, worst `!`.
fn print_table(table: &PivotTable) -> Result<()> {
    println!(
        "{} ({})",
        table.metric.label,
        match table.metric.orientation {
            MetricOrientation::Maximize => "maximize",
            MetricOrientation::Minimize => "minimize",
        }
    );
    let highlights = table.row_highlights();
    let mut writer = TabWriter::new(stdout());
    writeln!(writer, "PROBLEM\t{}", table.algorithms.join("\t"))?;
    for (r, problem) in table.problems.iter().enumerate() {
        let cells: Vec<String> = table.values[r]
            .iter()
            .enumerate()
            .map(|(c, cell)| match cell {
                Some(value) => {
                    let marker = if highlights[r].best.contains(&c) {
                        " *"
                    } else if highlights[r].worst.contains(&c) {
                        " !"
                    } else {
                        ""
                    };
                    format!("{:.prec$}{marker}", value, prec = table.metric.precision as usize)
                }
                None => "--".to_string(),
            })
            .collect();
        writeln!(writer, "{}\t{}", problem, cells.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}

fn print_csv(table: &PivotTable) -> Result<()> {
    println!("problem,{}", table.algorithms.join(","));
    for (r, problem) in table.problems.iter().enumerate() {
        let cells: Vec<String> = table.values[r]
            .iter()
            .map(|cell| match cell {
                Some(value) => {
                    format!("{:.prec$}", value, prec = table.metric.precision as usize)
                }
                None => String::new(),
            })
            .collect();
        println!("{},{}", problem, cells.join(","));
    }
    Ok(())
}
