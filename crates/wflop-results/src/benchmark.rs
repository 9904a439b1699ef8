//! Benchmark result loading.
//!
//! Benchmark harnesses emit a JSON array of measured configurations, each
//! a parameter mapping plus a primary metric (score and score error).
//! Input order is preserved because it is significant for display.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use wflop_core::WflopError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryMetric {
    pub score: f64,
    pub score_error: f64,
}

/// One measured benchmark configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRecord {
    pub params: BTreeMap<String, serde_json::Value>,
    pub primary_metric: PrimaryMetric,
}

impl BenchmarkRecord {
    /// Human-readable axis label: `key=value` pairs in sorted key order.
    pub fn label(&self) -> String {
        if self.params.is_empty() {
            return "default".to_string();
        }
        self.params
            .iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(s) => format!("{key}={s}"),
                other => format!("{key}={other}"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBenchmarkEntry {
    #[serde(default)]
    params: BTreeMap<String, serde_json::Value>,
    primary_metric: Option<serde_json::Value>,
}

/// Load a benchmark result list, preserving input order.
///
/// An entry without a usable `primaryMetric` is a mandatory-field failure
/// and aborts the whole load with a [`WflopError::Format`] naming the
/// entry.
pub fn load_benchmark_json(path: &Path) -> Result<Vec<BenchmarkRecord>> {
    let file = File::open(path)
        .with_context(|| format!("opening benchmark results '{}'", path.display()))?;
    let entries: Vec<RawBenchmarkEntry> = serde_json::from_reader(file)
        .with_context(|| format!("parsing benchmark results '{}'", path.display()))?;
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let raw_metric = entry.primary_metric.ok_or_else(|| {
            WflopError::Format(format!(
                "benchmark entry {index} in '{}' is missing primaryMetric",
                path.display()
            ))
        })?;
        let primary_metric: PrimaryMetric = serde_json::from_value(raw_metric).map_err(|err| {
            WflopError::Format(format!(
                "benchmark entry {index} in '{}' has an invalid primaryMetric: {err}",
                path.display()
            ))
        })?;
        records.push(BenchmarkRecord {
            params: entry.params,
            primary_metric,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const BENCH_JSON: &str = r#"[
        {
            "params": { "useDistanceMatrix": "true", "useIntersectedAreaMatrix": "false" },
            "primaryMetric": { "score": 12.5, "scoreError": 0.4 }
        },
        {
            "params": { "useDistanceMatrix": "false", "useIntersectedAreaMatrix": "false" },
            "primaryMetric": { "score": 30.1, "scoreError": 1.2 }
        }
    ]"#;

    fn write_json(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("benchmark_result.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn load_preserves_input_order() {
        let (_dir, path) = write_json(BENCH_JSON);
        let records = load_benchmark_json(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].primary_metric.score, 12.5);
        assert_eq!(records[1].primary_metric.score, 30.1);
    }

    #[test]
    fn label_joins_params_in_key_order() {
        let (_dir, path) = write_json(BENCH_JSON);
        let records = load_benchmark_json(&path).unwrap();
        assert_eq!(
            records[0].label(),
            "useDistanceMatrix=true, useIntersectedAreaMatrix=false"
        );
    }

    #[test]
    fn missing_primary_metric_fails_with_format_error() {
        let (_dir, path) = write_json(r#"[ { "params": { "a": "1" } } ]"#);
        let err = load_benchmark_json(&path).unwrap_err();
        let format_err = err.downcast_ref::<WflopError>().unwrap();
        assert!(matches!(format_err, WflopError::Format(_)));
        assert!(err.to_string().contains("entry 0"));
    }

    #[test]
    fn malformed_primary_metric_names_the_entry() {
        let (_dir, path) =
            write_json(r#"[ { "params": {}, "primaryMetric": { "score": "fast" } } ]"#);
        let err = load_benchmark_json(&path).unwrap_err();
        assert!(err.to_string().contains("invalid primaryMetric"));
    }

    #[test]
    fn empty_params_get_a_default_label() {
        let record = BenchmarkRecord {
            params: BTreeMap::new(),
            primary_metric: PrimaryMetric {
                score: 1.0,
                score_error: 0.0,
            },
        };
        assert_eq!(record.label(), "default");
    }
}
