#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Tabular dataset snapshots: typed cells, CSV ingestion, bundled samples and the
//! descriptive statistics used by exploration views and the correlation engine.

/// Dataset, column and cell definitions.
#[path = "../table.rs"]
pub mod table;

/// Error taxonomy for ingestion and construction.
#[path = "../error.rs"]
pub mod error;

/// CSV parsing with per-cell type detection.
#[path = "../ingest.rs"]
pub mod ingest;

/// Embedded sample datasets.
#[path = "../samples.rs"]
pub mod samples;

/// Correlation, label encoding and summary statistics.
#[path = "../stats.rs"]
pub mod stats;

pub use error::DatasetError;
pub use ingest::{load_csv, parse_csv};
pub use samples::SampleDataset;
pub use stats::{
    column_stats, correlation_matrix, histogram, label_encode, numeric_sequence,
    pairwise_correlation, pearson_correlation, value_counts, ColumnStats, CorrelationMatrix,
    HistogramBin, ValueCount,
};
pub use table::{CellValue, ColumnInfo, ColumnType, Dataset, Record};
