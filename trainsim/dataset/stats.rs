use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::{CellValue, ColumnType, Dataset};

/// Pearson correlation of two equal-length sequences.
///
/// Sums are taken around the means, so large offsets do not swamp small spreads.
/// Empty input, zero variance in either sequence, or a non-finite result all yield `0.0`.
/// Extra elements of the longer sequence are ignored.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let len = x.len().min(y.len());
    if len == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..len], &y[..len]);
    let n = len as f64;
    // Anchored on the first value so a constant sequence centres to exact zeros.
    let mean = |v: &[f64]| v[0] + v.iter().map(|&vi| vi - v[0]).sum::<f64>() / n;
    let (mean_x, mean_y) = (mean(x), mean(y));
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let (dx, dy) = (xi - mean_x, yi - mean_y);
        cov = dx.mul_add(dy, cov);
        var_x = dx.mul_add(dx, var_x);
        var_y = dy.mul_add(dy, var_y);
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    let r = cov / (var_x * var_y).sqrt();
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Pearson correlation over the positions where both values are finite.
#[must_use]
pub fn pairwise_correlation(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .unzip();
    pearson_correlation(&xs, &ys)
}

/// Maps each distinct value to the index of its first appearance.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn label_encode(values: &[&CellValue]) -> Vec<f64> {
    let mut codes: HashMap<String, usize> = HashMap::new();
    values
        .iter()
        .map(|value| {
            let next = codes.len();
            *codes.entry(value.identity_key()).or_insert(next) as f64
        })
        .collect()
}

/// Numeric view of a column: numeric columns as-is (non-numeric cells become NaN),
/// every other column label-encoded.
#[must_use]
pub fn numeric_sequence(dataset: &Dataset, column: &str) -> Option<Vec<f64>> {
    let info = dataset.column(column)?;
    let values = dataset.column_values(column)?;
    if info.is_numeric() {
        Some(
            values
                .iter()
                .map(|cell| cell.as_number().unwrap_or(f64::NAN))
                .collect(),
        )
    } else {
        Some(label_encode(&values))
    }
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    /// Column name.
    pub column: String,
    /// Inferred type.
    pub inferred_type: ColumnType,
    /// Non-missing cells.
    pub count: usize,
    /// Missing cells.
    pub missing: usize,
    /// Distinct non-missing values.
    pub unique: usize,
    /// Mean of numeric values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// Median of numeric values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    /// Population standard deviation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    /// Smallest numeric value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Largest numeric value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Computes [`ColumnStats`]; numeric fields are only filled for numeric columns.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn column_stats(dataset: &Dataset, column: &str) -> Option<ColumnStats> {
    let info = dataset.column(column)?;
    let values = dataset.column_values(column)?;
    let mut stats = ColumnStats {
        column: info.name.clone(),
        inferred_type: info.inferred_type,
        count: values.len() - info.missing_count,
        missing: info.missing_count,
        unique: info.unique_count,
        mean: None,
        median: None,
        std_dev: None,
        min: None,
        max: None,
    };
    if !info.is_numeric() {
        return Some(stats);
    }
    let mut numbers: Vec<f64> = values.iter().filter_map(|cell| cell.as_number()).collect();
    if numbers.is_empty() {
        return Some(stats);
    }
    numbers.sort_by(f64::total_cmp);
    let n = numbers.len() as f64;
    let mean = numbers.iter().sum::<f64>() / n;
    let variance = numbers.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let mid = numbers.len() / 2;
    let median = if numbers.len() % 2 == 0 {
        (numbers[mid - 1] + numbers[mid]) / 2.0
    } else {
        numbers[mid]
    };
    stats.mean = Some(mean);
    stats.median = Some(median);
    stats.std_dev = Some(variance.sqrt());
    stats.min = numbers.first().copied();
    stats.max = numbers.last().copied();
    Some(stats)
}

/// Equal-width histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge (inclusive for the last bin).
    pub end: f64,
    /// Values falling into the bin.
    pub count: usize,
}

/// Bins the finite values into `bins` equal-width buckets.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: finite.len(),
        }];
    }
    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|idx| HistogramBin {
            start: (idx as f64).mul_add(width, min),
            end: if idx + 1 == bins {
                max
            } else {
                ((idx + 1) as f64).mul_add(width, min)
            },
            count: 0,
        })
        .collect();
    for value in finite {
        let idx = (((value - min) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Occurrences of one distinct value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    /// Display form of the value (empty for missing).
    pub value: String,
    /// Occurrences.
    pub count: usize,
}

/// Distinct values of a column by descending count; ties keep first-appearance order.
#[must_use]
pub fn value_counts(dataset: &Dataset, column: &str) -> Option<Vec<ValueCount>> {
    let values = dataset.column_values(column)?;
    let mut counts: IndexMap<String, ValueCount> = IndexMap::new();
    for cell in values {
        counts
            .entry(cell.identity_key())
            .or_insert_with(|| ValueCount {
                value: cell.to_string(),
                count: 0,
            })
            .count += 1;
    }
    let mut out: Vec<ValueCount> = counts.into_values().collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    Some(out)
}

/// Square correlation matrix over the numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Column names, row/column order of `values`.
    pub columns: Vec<String>,
    /// `values[i][j]` = correlation of `columns[i]` and `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Looks up the coefficient for a pair of columns.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Pairwise-complete correlation matrix of every numeric column. Diagonal is 1.
#[must_use]
pub fn correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
    let numeric: Vec<(String, Vec<f64>)> = dataset
        .columns()
        .iter()
        .filter(|column| column.is_numeric())
        .filter_map(|column| {
            numeric_sequence(dataset, &column.name).map(|seq| (column.name.clone(), seq))
        })
        .collect();
    let size = numeric.len();
    let mut values = vec![vec![0.0; size]; size];
    for i in 0..size {
        values[i][i] = 1.0;
        for j in (i + 1)..size {
            let r = pairwise_correlation(&numeric[i].1, &numeric[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        columns: numeric.into_iter().map(|(name, _)| name).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ingest::parse_csv, samples::SampleDataset};

    #[test]
    fn correlation_of_linear_sequences() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let up = [2.0, 4.0, 6.0, 8.0, 10.0];
        let down = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((pearson_correlation(&x, &up) - 1.0).abs() < 1e-12);
        assert!((pearson_correlation(&x, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn self_correlation_is_one() {
        let x = [0.3, 7.1, -2.4, 9.9, 0.0, 4.2];
        assert!((pearson_correlation(&x, &x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn self_correlation_survives_large_offsets() {
        let ids = [1e6, 1e6 + 1.0, 1e6 + 2.0];
        assert!((pearson_correlation(&ids, &ids) - 1.0).abs() < 1e-12);
        let shifted = [5.0, 6.0, 7.0];
        assert!((pearson_correlation(&ids, &shifted) - 1.0).abs() < 1e-12);
        assert_eq!(pearson_correlation(&[1e6, 1e6, 1e6], &shifted), 0.0);
        assert_eq!(pearson_correlation(&[0.1, 0.1, 0.1, 0.1], &[1.0, 5.0, 2.0, 7.0]), 0.0);
    }

    #[test]
    fn degenerate_inputs_yield_zero() {
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
        assert_eq!(pearson_correlation(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson_correlation(&[0.1, 0.1, 0.1], &[1.0, 5.0, 2.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[f64::NAN, 1.0]), 0.0);
    }

    #[test]
    fn correlation_stays_in_bounds() {
        let x = [1e9, 1e9 + 1.0, 1e9 + 2.0, 1e9 + 3.0];
        let y = [0.5, 0.25, 0.125, 0.0625];
        let r = pearson_correlation(&x, &y);
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn pairwise_skips_missing() {
        let x = [1.0, f64::NAN, 3.0, 4.0];
        let y = [2.0, 100.0, 6.0, 8.0];
        assert!((pairwise_correlation(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn label_encoding_uses_first_appearance() {
        let cells = [
            CellValue::Text("b".into()),
            CellValue::Text("a".into()),
            CellValue::Text("b".into()),
            CellValue::Missing,
            CellValue::Text("c".into()),
        ];
        let refs: Vec<&CellValue> = cells.iter().collect();
        assert_eq!(label_encode(&refs), vec![0.0, 1.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn numeric_sequence_encodes_categories() {
        let dataset = SampleDataset::Iris.load().unwrap();
        let species = numeric_sequence(&dataset, "species").unwrap();
        assert_eq!(species[0], 0.0);
        assert_eq!(species[10], 1.0);
        assert_eq!(species[29], 2.0);
        let width = numeric_sequence(&dataset, "petal_width").unwrap();
        assert_eq!(width[0], 0.2);
        assert!(numeric_sequence(&dataset, "color").is_none());
    }

    #[test]
    fn column_stats_for_numbers() {
        let dataset = parse_csv("n", "v,tag\n1,a\n2,b\n3,a\n4,\n").unwrap();
        let stats = column_stats(&dataset, "v").unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, Some(2.5));
        assert_eq!(stats.median, Some(2.5));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(4.0));
        assert!((stats.std_dev.unwrap() - 1.25_f64.sqrt()).abs() < 1e-12);
        let tag = column_stats(&dataset, "tag").unwrap();
        assert_eq!(tag.missing, 1);
        assert_eq!(tag.unique, 2);
        assert!(tag.mean.is_none());
    }

    #[test]
    fn histogram_bins_cover_range() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, f64::NAN], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[3].count, 2);
        assert_eq!(bins[3].end, 4.0);
        assert_eq!(histogram(&[7.0, 7.0], 5).len(), 1);
        assert!(histogram(&[], 5).is_empty());
    }

    #[test]
    fn value_counts_sorted() {
        let dataset = parse_csv("c", "color\nred\nblue\nblue\ngreen\nred\nblue\n").unwrap();
        let counts = value_counts(&dataset, "color").unwrap();
        assert_eq!(counts[0].value, "blue");
        assert_eq!(counts[0].count, 3);
        assert_eq!(counts[1].value, "red");
        assert_eq!(counts[2].value, "green");
    }

    #[test]
    fn correlation_matrix_is_symmetric() {
        let dataset = SampleDataset::Iris.load().unwrap();
        let matrix = correlation_matrix(&dataset);
        assert_eq!(matrix.columns.len(), 4);
        for i in 0..4 {
            assert_eq!(matrix.values[i][i], 1.0);
            for j in 0..4 {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
        assert!(matrix.get("petal_length", "petal_width").unwrap() > 0.9);
    }
}
