//! Aggregation and pivot engine.
//!
//! Reshapes flat summary rows into a problem × algorithm matrix for one
//! metric. Row and column order is the first-seen order of the input,
//! which is deterministic for a given table and matches how the
//! convergence loader groups problems. Duplicate (problem, algorithm)
//! pairs are an error, never a silent overwrite.

use serde::{Deserialize, Serialize};
use wflop_core::{WflopError, WflopResult};

use crate::summary::SummaryRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricOrientation {
    Maximize,
    Minimize,
}

/// Display configuration for one summary metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Column name in the summary table
    pub key: String,
    /// Human-readable label for chart/table titles
    pub label: String,
    /// Decimal places cells are rounded to
    pub precision: u32,
    pub orientation: MetricOrientation,
}

/// The metrics the standard experiments harness records.
pub fn default_metrics() -> Vec<MetricConfig> {
    vec![
        MetricConfig {
            key: "mean_best_fitness".into(),
            label: "Average Best Fitness".into(),
            precision: 2,
            orientation: MetricOrientation::Maximize,
        },
        MetricConfig {
            key: "mean_best_found_at".into(),
            label: "Mean Iteration of Best".into(),
            precision: 1,
            orientation: MetricOrientation::Minimize,
        },
        MetricConfig {
            key: "conversion_efficiency".into(),
            label: "Conversion Efficiency".into(),
            precision: 3,
            orientation: MetricOrientation::Maximize,
        },
    ]
}

/// A problem × algorithm matrix for one metric. Cells are `None` where no
/// (problem, algorithm) row exists.
#[derive(Debug, Clone, Serialize)]
pub struct PivotTable {
    pub metric: MetricConfig,
    pub problems: Vec<String>,
    pub algorithms: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// Presentation highlighting for one pivot row: column indices holding the
/// best and worst values under the metric's orientation. Ties mark every
/// tied cell; a constant row marks all cells both best and worst.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowHighlight {
    pub best: Vec<usize>,
    pub worst: Vec<usize>,
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Pivot summary rows into a matrix for the chosen metric.
///
/// Cell values are rounded to the metric's precision. A (problem,
/// algorithm) pair occurring twice fails with
/// [`WflopError::AmbiguousAggregation`]; a row lacking the metric column
/// entirely fails with [`WflopError::Format`].
pub fn pivot(rows: &[SummaryRow], metric: &MetricConfig) -> WflopResult<PivotTable> {
    let mut problems: Vec<String> = Vec::new();
    let mut algorithms: Vec<String> = Vec::new();
    for row in rows {
        if !problems.contains(&row.problem) {
            problems.push(row.problem.clone());
        }
        if !algorithms.contains(&row.algorithm) {
            algorithms.push(row.algorithm.clone());
        }
    }

    let mut values = vec![vec![None; algorithms.len()]; problems.len()];
    for row in rows {
        let value = row.metric(&metric.key).ok_or_else(|| {
            WflopError::Format(format!(
                "summary row ({}, {}) has no metric '{}'",
                row.problem, row.algorithm, metric.key
            ))
        })?;
        // positions exist by construction of the first pass
        let r = problems.iter().position(|p| p == &row.problem).unwrap();
        let c = algorithms.iter().position(|a| a == &row.algorithm).unwrap();
        let cell = &mut values[r][c];
        if cell.is_some() {
            return Err(WflopError::AmbiguousAggregation {
                problem: row.problem.clone(),
                algorithm: row.algorithm.clone(),
                metric: metric.key.clone(),
            });
        }
        *cell = Some(round_to(value, metric.precision));
    }

    Ok(PivotTable {
        metric: metric.clone(),
        problems,
        algorithms,
        values,
    })
}

impl PivotTable {
    /// Best/worst column indices per row, orientation-aware. `None` cells
    /// are never marked.
    pub fn row_highlights(&self) -> Vec<RowHighlight> {
        self.values
            .iter()
            .map(|row| {
                let present: Vec<(usize, f64)> = row
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, cell)| cell.map(|value| (idx, value)))
                    .collect();
                let Some(&(_, first)) = present.first() else {
                    return RowHighlight::default();
                };
                let mut high = first;
                let mut low = first;
                for &(_, value) in &present {
                    if value > high {
                        high = value;
                    }
                    if value < low {
                        low = value;
                    }
                }
                let (best_value, worst_value) = match self.metric.orientation {
                    MetricOrientation::Maximize => (high, low),
                    MetricOrientation::Minimize => (low, high),
                };
                RowHighlight {
                    best: present
                        .iter()
                        .filter(|(_, value)| *value == best_value)
                        .map(|(idx, _)| *idx)
                        .collect(),
                    worst: present
                        .iter()
                        .filter(|(_, value)| *value == worst_value)
                        .map(|(idx, _)| *idx)
                        .collect(),
                }
            })
            .collect()
    }
}
