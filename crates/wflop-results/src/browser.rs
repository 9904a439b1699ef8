//! Metric cycling for interactive presentation layers.
//!
//! A chart or table frontend cycles through metrics with forward/backward
//! keys. The state lives here as an explicit index over pre-pivoted
//! tables, so the frontend only queries; it never re-derives data while
//! cycling.

use wflop_core::{WflopError, WflopResult};

use crate::pivot::{pivot, MetricConfig, PivotTable};
use crate::summary::SummaryRow;

/// Finite-state cursor over one pivot table per configured metric.
#[derive(Debug)]
pub struct MetricBrowser {
    tables: Vec<PivotTable>,
    current_index: usize,
}

impl MetricBrowser {
    /// Pivot every metric once up front. Fails on the first duplicate
    /// (problem, algorithm) pair or missing metric column.
    pub fn new(rows: &[SummaryRow], metrics: &[MetricConfig]) -> WflopResult<Self> {
        if metrics.is_empty() {
            return Err(WflopError::Validation(
                "metric browser needs at least one metric".into(),
            ));
        }
        let tables = metrics
            .iter()
            .map(|metric| pivot(rows, metric))
            .collect::<WflopResult<Vec<_>>>()?;
        Ok(Self {
            tables,
            current_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The table for the currently selected metric.
    pub fn active(&self) -> &PivotTable {
        &self.tables[self.current_index]
    }

    /// Advance to the next metric, wrapping past the end.
    pub fn next(&mut self) -> &PivotTable {
        self.current_index = (self.current_index + 1) % self.tables.len();
        self.active()
    }

    /// Step back to the previous metric, wrapping past the start.
    pub fn previous(&mut self) -> &PivotTable {
        self.current_index = (self.current_index + self.tables.len() - 1) % self.tables.len();
        self.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivot::default_metrics;

    fn rows() -> Vec<SummaryRow> {
        vec![
            SummaryRow {
                problem: "P1".into(),
                algorithm: "GA".into(),
                metrics: vec![
                    ("mean_best_fitness".into(), 152.3),
                    ("mean_best_found_at".into(), 410.0),
                    ("conversion_efficiency".into(), 0.412),
                ],
            },
            SummaryRow {
                problem: "P1".into(),
                algorithm: "LSHADE".into(),
                metrics: vec![
                    ("mean_best_fitness".into(), 149.8),
                    ("mean_best_found_at".into(), 380.0),
                    ("conversion_efficiency".into(), 0.398),
                ],
            },
        ]
    }

    #[test]
    fn cycling_wraps_both_directions() {
        let mut browser = MetricBrowser::new(&rows(), &default_metrics()).unwrap();
        assert_eq!(browser.len(), 3);
        assert_eq!(browser.active().metric.key, "mean_best_fitness");

        assert_eq!(browser.next().metric.key, "mean_best_found_at");
        assert_eq!(browser.next().metric.key, "conversion_efficiency");
        // wraps forward to the first metric
        assert_eq!(browser.next().metric.key, "mean_best_fitness");
        // wraps backward to the last metric
        assert_eq!(browser.previous().metric.key, "conversion_efficiency");
    }

    #[test]
    fn construction_fails_on_duplicate_pairs() {
        let mut duplicated = rows();
        duplicated.push(duplicated[0].clone());
        let err = MetricBrowser::new(&duplicated, &default_metrics()).unwrap_err();
        assert!(matches!(err, WflopError::AmbiguousAggregation { .. }));
    }

    #[test]
    fn construction_requires_a_metric() {
        let err = MetricBrowser::new(&rows(), &[]).unwrap_err();
        assert!(matches!(err, WflopError::Validation(_)));
    }
}
