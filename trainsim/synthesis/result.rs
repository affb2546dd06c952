use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ModelCategory;

/// Rounds to `places` decimals.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// 2x2 outcome counts laid out `[[TP, FP], [FN, TN]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfusionMatrix(pub [[u32; 2]; 2]);

impl ConfusionMatrix {
    /// Builds the matrix from the four counts.
    #[must_use]
    pub const fn from_counts(tp: u32, fp: u32, fn_: u32, tn: u32) -> Self {
        Self([[tp, fp], [fn_, tn]])
    }

    /// True positives.
    #[must_use]
    pub const fn true_positives(&self) -> u32 {
        self.0[0][0]
    }

    /// False positives.
    #[must_use]
    pub const fn false_positives(&self) -> u32 {
        self.0[0][1]
    }

    /// False negatives.
    #[must_use]
    pub const fn false_negatives(&self) -> u32 {
        self.0[1][0]
    }

    /// True negatives.
    #[must_use]
    pub const fn true_negatives(&self) -> u32 {
        self.0[1][1]
    }

    /// Sum of all cells.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.true_positives()
            + self.false_positives()
            + self.false_negatives()
            + self.true_negatives()
    }
}

/// Headline metrics, rounded to 4 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Share of correct predictions.
    pub accuracy: f64,
    /// TP / (TP + FP).
    pub precision: f64,
    /// TP / (TP + FN).
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1_score: f64,
    /// Area under the ROC curve (classifiers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auc: Option<f64>,
    /// Root mean squared error (regressors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmse: Option<f64>,
    /// Mean absolute error (regressors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mae: Option<f64>,
}

impl Metrics {
    /// Derives accuracy, precision, recall and F1 from the matrix alone.
    /// Zero denominators give `0.0`; an empty matrix has accuracy `0.0`.
    #[must_use]
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let tp = f64::from(matrix.true_positives());
        let fp = f64::from(matrix.false_positives());
        let fn_ = f64::from(matrix.false_negatives());
        let tn = f64::from(matrix.true_negatives());
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = ratio(2.0 * precision * recall, precision + recall);
        let accuracy = ratio(tp + tn, f64::from(matrix.total()));
        Self {
            accuracy: round_to(accuracy, 4),
            precision: round_to(precision, 4),
            recall: round_to(recall, 4),
            f1_score: round_to(f1_score, 4),
            auc: None,
            rmse: None,
            mae: None,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Feature weight for the importance bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Feature column.
    pub name: String,
    /// `|impact|`.
    pub importance: f64,
}

/// One simulated epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// 1-based epoch.
    pub epoch: u32,
    /// Training loss.
    pub loss: f64,
    /// Training accuracy.
    pub accuracy: f64,
    /// Validation loss, `loss + 0.05`.
    pub val_loss: f64,
    /// Validation accuracy, `accuracy - 0.03`.
    pub val_accuracy: f64,
}

/// Point on a ROC or precision-recall curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Horizontal coordinate (FPR or recall).
    pub x: f64,
    /// Vertical coordinate (TPR or precision).
    pub y: f64,
}

/// Residual plot point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualPoint {
    /// Predicted value.
    pub predicted: f64,
    /// Actual minus predicted.
    pub residual: f64,
}

/// Learning curve point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningCurvePoint {
    /// Training rows used.
    pub train_size: usize,
    /// Score on the training rows.
    pub train_score: f64,
    /// Score on held-out rows.
    pub validation_score: f64,
}

/// Radar chart axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    /// Axis label.
    pub metric: String,
    /// Value in [0, 1].
    pub value: f64,
}

/// 2D projection point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// First component.
    pub x: f64,
    /// Second component.
    pub y: f64,
    /// `Class 0` or `Class 1`.
    pub label: String,
}

/// Sign of the underlying feature/target correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Non-negative correlation.
    Positive,
    /// Negative correlation.
    Negative,
}

impl Direction {
    /// Direction of a correlation coefficient; zero counts as positive.
    #[must_use]
    pub fn of(impact: f64) -> Self {
        if impact < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// `1.0` or `-1.0`.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// SHAP or LIME bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    /// Feature column.
    pub feature: String,
    /// Stored value: a magnitude for SHAP, signed for LIME.
    pub value: f64,
    /// Sign of the feature's correlation with the target.
    pub direction: Direction,
}

impl Attribution {
    /// Value with the correlation sign applied, as charts render it.
    #[must_use]
    pub fn signed_value(&self) -> f64 {
        self.value.abs() * self.direction.sign()
    }
}

/// Word cloud entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordWeight {
    /// Word.
    pub text: String,
    /// Frequency.
    pub value: u32,
}

/// Everything a finished mock training run displays. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResult {
    /// Run identifier.
    pub run_id: Uuid,
    /// Seed the run was generated from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Model display name.
    pub model_name: String,
    /// Model family.
    pub model_category: ModelCategory,
    /// Headline metrics.
    pub metrics: Metrics,
    /// Simulated 200-sample confusion matrix.
    pub confusion_matrix: ConfusionMatrix,
    /// Every ranked feature with `|impact|`.
    pub feature_importance: Vec<FeatureImportance>,
    /// Per-epoch loss/accuracy.
    pub loss_history: Vec<EpochRecord>,
    /// 21-point ROC curve.
    pub roc_curve: Vec<CurvePoint>,
    /// 21-point precision-recall curve.
    pub precision_recall_curve: Vec<CurvePoint>,
    /// Residual scatter.
    pub residuals: Vec<ResidualPoint>,
    /// Score by training-set size.
    pub learning_curve: Vec<LearningCurvePoint>,
    /// Five radar axes.
    pub radar_data: Vec<RadarPoint>,
    /// Decorative activation strengths.
    pub layer_activations: Vec<f64>,
    /// PCA scatter.
    pub pca_components: Vec<ProjectionPoint>,
    /// t-SNE scatter.
    pub tsne_components: Vec<ProjectionPoint>,
    /// UMAP scatter.
    pub umap_components: Vec<ProjectionPoint>,
    /// Global attributions for the top features.
    pub shap_values: Vec<Attribution>,
    /// Local attributions for the top features.
    pub lime_values: Vec<Attribution>,
    /// Word frequencies for NLP views.
    pub word_cloud: Vec<WordWeight>,
    /// Narrative summary.
    pub explanation: String,
    /// Preprocessing steps the run claims.
    pub pipeline_summary: Vec<String>,
}
