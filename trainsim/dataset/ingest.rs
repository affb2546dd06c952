use std::{fs, path::Path};

use csv::{ReaderBuilder, Trim};

use crate::{
    error::DatasetError,
    table::{CellValue, Dataset, Record},
};

/// Parses comma-delimited text with a header row into a [`Dataset`].
pub fn parse_csv(name: impl Into<String>, text: &str) -> Result<Dataset, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(DatasetError::EmptyHeader);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() != headers.len() {
            return Err(DatasetError::RowShape {
                line: row.position().map_or(0, csv::Position::line),
                expected: headers.len(),
                found: row.len(),
            });
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, raw)| (header.clone(), CellValue::parse(raw)))
            .collect();
        records.push(record);
    }
    Dataset::from_records(name, headers, records)
}

/// Reads a CSV file; the dataset is named after the file stem.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map_or_else(|| "dataset".to_string(), |stem| stem.to_string_lossy().into_owned());
    parse_csv(name, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;
    use tempfile::tempdir;

    #[test]
    fn parses_typed_cells() {
        let dataset = parse_csv(
            "mixed",
            "id,score,passed,comment\n1,0.5,true,ok\n2,,false,\"late, but fine\"\n",
        )
        .unwrap();
        assert_eq!(dataset.total_rows(), 2);
        let types: Vec<_> = dataset
            .columns()
            .iter()
            .map(|column| column.inferred_type)
            .collect();
        assert_eq!(
            types,
            vec![
                ColumnType::Number,
                ColumnType::Number,
                ColumnType::Boolean,
                ColumnType::String
            ]
        );
        assert_eq!(dataset.column("score").unwrap().missing_count, 1);
        assert_eq!(
            dataset.rows()[1]["comment"],
            CellValue::Text("late, but fine".into())
        );
    }

    #[test]
    fn reports_ragged_rows() {
        let err = parse_csv("ragged", "a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::RowShape {
                line: 3,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            parse_csv("empty", "").unwrap_err(),
            DatasetError::EmptyHeader
        ));
    }

    #[test]
    fn header_only_yields_empty_dataset() {
        let dataset = parse_csv("header", "x,y\n").unwrap();
        assert_eq!(dataset.total_rows(), 0);
        assert_eq!(dataset.columns()[0].inferred_type, ColumnType::Unknown);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("housing.csv");
        fs::write(&path, "rooms,price\n3,120\n4,150\n").unwrap();
        let dataset = load_csv(&path).unwrap();
        assert_eq!(dataset.name(), "housing");
        assert_eq!(dataset.total_rows(), 2);
    }
}
