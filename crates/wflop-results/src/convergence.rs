//! Convergence trace discovery and grouping.
//!
//! Solvers drop one CSV per run, named
//! `convergence_<problemIdentity>_<algorithmIdentity>.csv` with columns
//! `x,best_fitness`. Scanning groups the traces by problem so one chart
//! can overlay every algorithm that ran on it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename prefix that marks an artifact as a convergence trace.
pub const CONVERGENCE_PREFIX: &str = "convergence_";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergencePoint {
    /// Iteration count or elapsed time, whatever the solver recorded
    pub x: f64,
    pub best_fitness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceSeries {
    pub points: Vec<ConvergencePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmSeries {
    pub algorithm: String,
    pub series: ConvergenceSeries,
}

/// All traces recorded for one problem, in scan order.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemGroup {
    pub problem: String,
    pub series: Vec<AlgorithmSeries>,
}

/// Split a trace filename into (problem, algorithm).
///
/// Problem identities contain underscores, so the algorithm is taken as
/// the final underscore-delimited component and the problem is the
/// remainder. Names without the prefix, the suffix or both components
/// return `None`.
pub fn parse_convergence_name(file_name: &str) -> Option<(String, String)> {
    let stem = file_name.strip_suffix(".csv")?;
    let rest = stem.strip_prefix(CONVERGENCE_PREFIX)?;
    let (problem, algorithm) = rest.rsplit_once('_')?;
    if problem.is_empty() || algorithm.is_empty() {
        return None;
    }
    Some((problem.to_string(), algorithm.to_string()))
}

/// Load one convergence trace.
pub fn load_convergence_csv(path: &Path) -> Result<ConvergenceSeries> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening convergence trace '{}'", path.display()))?;
    let mut points = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let point: ConvergencePoint = result.with_context(|| {
            format!(
                "parsing row {} of convergence trace '{}'",
                row + 2,
                path.display()
            )
        })?;
        points.push(point);
    }
    Ok(ConvergenceSeries { points })
}

/// Scan a directory of run artifacts and group convergence traces by
/// problem identity.
///
/// Entries are visited in lexicographic filename order so the result is
/// reproducible regardless of filesystem iteration order. Groups appear in
/// first-encounter order; within a group, series keep scan order. Files
/// that do not match the naming convention are skipped (they belong to
/// other tooling); files that match but fail to parse abort the scan.
pub fn scan_convergence_dir(dir: &Path) -> Result<Vec<ProblemGroup>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("reading convergence directory '{}'", dir.display()))?;
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("listing convergence directory '{}'", dir.display()))?;
        if entry.path().is_file() {
            files.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    files.sort();

    let mut groups: Vec<ProblemGroup> = Vec::new();
    for (name, path) in files {
        let Some((problem, algorithm)) = parse_convergence_name(&name) else {
            tracing::debug!(file = %name, "skipping artifact outside the convergence naming convention");
            continue;
        };
        let series = load_convergence_csv(&path)?;
        match groups.iter_mut().find(|group| group.problem == problem) {
            Some(group) => group.series.push(AlgorithmSeries { algorithm, series }),
            None => groups.push(ProblemGroup {
                problem,
                series: vec![AlgorithmSeries { algorithm, series }],
            }),
        }
    }
    Ok(groups)
}
