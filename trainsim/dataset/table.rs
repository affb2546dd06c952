use std::{collections::HashSet, fmt};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// One raw cell. Serializes as a bare JSON scalar (`null` when missing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Finite number.
    Number(f64),
    /// `true` / `false`.
    Boolean(bool),
    /// Anything else.
    Text(String),
    /// Empty field.
    Missing,
}

impl CellValue {
    /// Types a raw field: empty is missing, numbers win over booleans, booleans over text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        if let Ok(number) = trimmed.parse::<f64>() {
            if number.is_finite() {
                return Self::Number(number);
            }
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Self::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Self::Boolean(false);
        }
        Self::Text(trimmed.to_string())
    }

    /// Whether the cell is empty.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric payload, if any.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Column type this cell would imply; `None` for missing cells.
    #[must_use]
    pub const fn kind(&self) -> Option<ColumnType> {
        match self {
            Self::Number(_) => Some(ColumnType::Number),
            Self::Boolean(_) => Some(ColumnType::Boolean),
            Self::Text(_) => Some(ColumnType::String),
            Self::Missing => None,
        }
    }

    /// Identity key used for distinct-value counting and label encoding.
    /// Variants never collide, so `Text("1")` and `Number(1.0)` stay distinct.
    #[must_use]
    pub fn identity_key(&self) -> String {
        match self {
            Self::Number(value) => format!("n:{value}"),
            Self::Boolean(value) => format!("b:{value}"),
            Self::Text(value) => format!("s:{value}"),
            Self::Missing => "missing".to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Missing => Ok(()),
        }
    }
}

/// Column type fixed at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Numeric column.
    Number,
    /// Boolean column.
    Boolean,
    /// Free text / categorical column.
    String,
    /// Every cell was missing.
    Unknown,
}

/// Column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Type of the first non-missing cell.
    pub inferred_type: ColumnType,
    /// Number of missing cells.
    pub missing_count: usize,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
}

impl ColumnInfo {
    /// Whether the correlation engine may use the column's values as-is.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.inferred_type == ColumnType::Number
    }
}

/// One row keyed by column name, in column order.
pub type Record = IndexMap<String, CellValue>;

/// Immutable snapshot of uploaded or sample tabular data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    name: String,
    columns: Vec<ColumnInfo>,
    rows: Vec<Record>,
    total_rows: usize,
}

impl Dataset {
    /// Builds a dataset, checking that every record carries exactly the header keys.
    /// Records are re-keyed into header order; column types and counts are inferred here
    /// and never re-derived.
    pub fn from_records(
        name: impl Into<String>,
        headers: Vec<String>,
        records: Vec<Record>,
    ) -> Result<Self, DatasetError> {
        if headers.is_empty() {
            return Err(DatasetError::EmptyHeader);
        }
        let mut seen = HashSet::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            if header.trim().is_empty() {
                return Err(DatasetError::BlankColumn(idx));
            }
            if !seen.insert(header.as_str()) {
                return Err(DatasetError::DuplicateColumn(header.clone()));
            }
        }

        let mut rows = Vec::with_capacity(records.len());
        for (row_idx, mut record) in records.into_iter().enumerate() {
            if record.len() != headers.len() {
                return Err(DatasetError::KeyMismatch { row: row_idx });
            }
            let mut ordered = Record::with_capacity(headers.len());
            for header in &headers {
                let value = record
                    .swap_remove(header)
                    .ok_or(DatasetError::KeyMismatch { row: row_idx })?;
                ordered.insert(header.clone(), value);
            }
            rows.push(ordered);
        }

        let columns = headers
            .iter()
            .map(|header| describe_column(header, &rows))
            .collect();
        let total_rows = rows.len();
        Ok(Self {
            name: name.into(),
            columns,
            rows,
            total_rows,
        })
    }

    /// Display identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column descriptors in source order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    /// Records in source order.
    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Row count.
    #[must_use]
    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Descriptor for `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Like [`Dataset::column`], but an error when absent.
    pub fn require_column(&self, name: &str) -> Result<&ColumnInfo, DatasetError> {
        self.column(name)
            .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))
    }

    /// Cells of one column in row order.
    #[must_use]
    pub fn column_values(&self, name: &str) -> Option<Vec<&CellValue>> {
        self.column(name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|record| record.get(name))
                .collect(),
        )
    }
}

fn describe_column(name: &str, rows: &[Record]) -> ColumnInfo {
    let mut inferred_type = None;
    let mut missing_count = 0;
    let mut distinct = HashSet::new();
    for cell in rows.iter().filter_map(|record| record.get(name)) {
        match cell.kind() {
            None => missing_count += 1,
            Some(kind) => {
                inferred_type.get_or_insert(kind);
                distinct.insert(cell.identity_key());
            }
        }
    }
    ColumnInfo {
        name: name.to_string(),
        inferred_type: inferred_type.unwrap_or(ColumnType::Unknown),
        missing_count,
        unique_count: distinct.len(),
    }
}
