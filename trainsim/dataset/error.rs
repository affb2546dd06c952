use thiserror::Error;

/// Errors raised while building or loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Malformed delimited text.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// No header row, or a header row without columns.
    #[error("dataset has no columns")]
    EmptyHeader,
    /// Two columns share a name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    /// Header names an empty column.
    #[error("column {0} has an empty name")]
    BlankColumn(usize),
    /// A data row has the wrong number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    RowShape {
        /// 1-based line in the source text.
        line: u64,
        /// Header width.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },
    /// A record's keys differ from the column names.
    #[error("record {row} does not match the column set")]
    KeyMismatch {
        /// 0-based record index.
        row: usize,
    },
    /// Requested column does not exist.
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    /// Requested sample dataset does not exist.
    #[error("unknown sample dataset: {0}")]
    UnknownSample(String),
}
