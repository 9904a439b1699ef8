//! Summary-metric table loading.
//!
//! The experiments harness writes one flat CSV with a `problem` and an
//! `algorithm` column plus one numeric column per metric. Loading is
//! header-driven so new metric columns appear downstream without code
//! changes.

use anyhow::{Context, Result};
use std::path::Path;
use wflop_core::WflopError;

/// One (problem, algorithm) row with its named scalar metrics, in column
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub problem: String,
    pub algorithm: String,
    pub metrics: Vec<(String, f64)>,
}

impl SummaryRow {
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| *value)
    }
}

/// Load a flat summary table, one row per (problem, algorithm) pair.
///
/// The `problem` and `algorithm` columns are mandatory; every other
/// column is read as a named numeric metric. Any non-numeric metric cell
/// aborts the load with the row and column named.
pub fn load_summary_csv(path: &Path) -> Result<Vec<SummaryRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening summary table '{}'", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("reading headers of summary table '{}'", path.display()))?
        .clone();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let problem_idx = column("problem").ok_or_else(|| {
        WflopError::Format(format!(
            "summary table '{}' is missing the 'problem' column",
            path.display()
        ))
    })?;
    let algorithm_idx = column("algorithm").ok_or_else(|| {
        WflopError::Format(format!(
            "summary table '{}' is missing the 'algorithm' column",
            path.display()
        ))
    })?;
    let metric_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != problem_idx && *idx != algorithm_idx)
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // header is line 1, first data row is line 2
        let line = index + 2;
        let record = record
            .with_context(|| format!("reading row {line} of summary table '{}'", path.display()))?;
        let problem = record.get(problem_idx).unwrap_or_default().trim().to_string();
        let algorithm = record
            .get(algorithm_idx)
            .unwrap_or_default()
            .trim()
            .to_string();
        if problem.is_empty() || algorithm.is_empty() {
            let column = if problem.is_empty() { "problem" } else { "algorithm" };
            return Err(WflopError::Format(format!(
                "summary table '{}' row {line}: column '{column}' is empty",
                path.display()
            ))
            .into());
        }
        let mut metrics = Vec::with_capacity(metric_columns.len());
        for (idx, name) in &metric_columns {
            let raw = record.get(*idx).unwrap_or_default();
            let value: f64 = raw.trim().parse().map_err(|_| {
                WflopError::Format(format!(
                    "summary table '{}' row {line}: column '{name}' is not numeric (got '{raw}')",
                    path.display()
                ))
            })?;
            metrics.push((name.clone(), value));
        }
        rows.push(SummaryRow {
            problem,
            algorithm,
            metrics,
        });
    }
    Ok(rows)
}
