//! Loading and aggregation of WFLOP solver results.
//!
//! Three loaders cover the three artifact shapes solvers produce
//! (benchmark timing lists, per-(problem, algorithm) convergence traces,
//! flat summary-metric tables), and the pivot engine reshapes summary rows
//! into problem × algorithm matrices with orientation-aware best/worst
//! highlighting. Everything here is read-only: loaders and pivots derive
//! views, they never mutate result artifacts.

pub mod benchmark;
pub mod browser;
pub mod convergence;
pub mod pivot;
pub mod summary;

pub use benchmark::{load_benchmark_json, BenchmarkRecord, PrimaryMetric};
pub use browser::MetricBrowser;
pub use convergence::{
    load_convergence_csv, parse_convergence_name, scan_convergence_dir, AlgorithmSeries,
    ConvergencePoint, ConvergenceSeries, ProblemGroup,
};
pub use pivot::{
    default_metrics, pivot, MetricConfig, MetricOrientation, PivotTable, RowHighlight,
};
pub use summary::{load_summary_csv, SummaryRow};
