use serde::{Deserialize, Serialize};
use trainsim_dataset::{numeric_sequence, pairwise_correlation, Dataset};

/// Signed correlation between one feature column and the encoded target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    /// Feature column name.
    pub name: String,
    /// Pearson coefficient in [-1, 1].
    pub impact: f64,
}

/// Ranks every non-target column by `|impact|`, strongest first.
///
/// Non-numeric columns (target included) are label-encoded by first appearance. Rows where
/// a numeric column has no number are skipped for that pair. An empty or unknown target
/// yields an empty list. Equal magnitudes keep column order.
#[must_use]
pub fn rank_feature_impacts(dataset: &Dataset, target_column: &str) -> Vec<FeatureImpact> {
    if target_column.trim().is_empty() {
        return Vec::new();
    }
    let Some(target) = numeric_sequence(dataset, target_column) else {
        return Vec::new();
    };
    let mut impacts: Vec<FeatureImpact> = dataset
        .columns()
        .iter()
        .filter(|column| column.name != target_column)
        .filter_map(|column| {
            let feature = numeric_sequence(dataset, &column.name)?;
            let impact = pairwise_correlation(&feature, &target);
            Some(FeatureImpact {
                name: column.name.clone(),
                impact: if impact.is_nan() { 0.0 } else { impact },
            })
        })
        .collect();
    impacts.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
    impacts
}
