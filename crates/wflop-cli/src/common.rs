//! Common CLI types and utilities shared across commands.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

/// Output format for tabular/structured data.
///
/// Commands that produce structured output use this enum so users can pick
/// their preferred format for piping and processing.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table (default for interactive use)
    #[default]
    Table,
    /// JSON object or array (pipe-friendly, structured)
    Json,
    /// JSON Lines - one JSON object per line (streaming-friendly)
    Jsonl,
    /// Comma-separated values (pipe to awk/cut/etc)
    Csv,
}

/// Write data as JSON to the given writer.
pub fn write_json<W: Write, T: Serialize>(
    data: &T,
    writer: &mut W,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data).map_err(io::Error::other)?;
    } else {
        serde_json::to_writer(&mut *writer, data).map_err(io::Error::other)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write data as JSON Lines (one JSON object per line) to the given writer.
pub fn write_jsonl<W: Write, T: Serialize>(data: &[T], writer: &mut W) -> io::Result<()> {
    for item in data {
        serde_json::to_writer(&mut *writer, item).map_err(io::Error::other)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Write JSON array data as CSV to the given writer.
/// Assumes all objects have the same keys.
pub fn write_csv_from_json<W: Write>(data: &[serde_json::Value], writer: &mut W) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    let headers: Vec<&str> = match data[0].as_object() {
        Some(obj) => obj.keys().map(|s| s.as_str()).collect(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Expected JSON objects",
            ))
        }
    };
    writeln!(writer, "{}", headers.join(","))?;

    for item in data {
        if let Some(obj) = item.as_object() {
            let values: Vec<String> = headers
                .iter()
                .map(|h| {
                    obj.get(*h)
                        .map(|v| match v {
                            serde_json::Value::String(s) => {
                                if s.contains(',') || s.contains('"') {
                                    format!("\"{}\"", s.replace('"', "\"\""))
                                } else {
                                    s.clone()
                                }
                            }
                            serde_json::Value::Null => String::new(),
                            other => other.to_string(),
                        })
                        .unwrap_or_default()
                })
                .collect();
            writeln!(writer, "{}", values.join(","))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_to_string() {
        let data = vec![
            serde_json::json!({"id": "wf_dim10_turb20_single_dir"}),
            serde_json::json!({"id": "wf_dim10_turb40_single_dir"}),
        ];
        let mut output = Vec::new();
        write_json(&data, &mut output, false).unwrap();
        let result = String::from_utf8(output).unwrap();
        assert!(result.contains("wf_dim10_turb20_single_dir"));
    }

    #[test]
    fn test_write_jsonl_to_string() {
        let data = vec![serde_json::json!({"id": 1}), serde_json::json!({"id": 2})];
        let mut output = Vec::new();
        write_jsonl(&data, &mut output).unwrap();
        let result = String::from_utf8(output).unwrap();
        assert_eq!(result.trim().lines().count(), 2);
    }

    #[test]
    fn test_write_csv_from_json() {
        let data = vec![
            serde_json::json!({"id": 1, "name": "A"}),
            serde_json::json!({"id": 2, "name": "B, C"}),
        ];
        let mut output = Vec::new();
        write_csv_from_json(&data, &mut output).unwrap();
        let result = String::from_utf8(output).unwrap();
        assert!(result.contains("id,name"));
        assert!(result.contains("\"B, C\""));
    }
}
