use std::{fmt, fs, path::Path, str::FromStr};

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Model names simulated as binary classifiers. Anything else is treated as a regressor.
pub const CLASSIFICATION_MODELS: &[&str] = &[
    "Logistic Regression",
    "Random Forest",
    "Decision Tree",
    "SVM",
    "KNN",
    "Naive Bayes",
    "Gradient Boosting",
    "XGBoost",
    "LightGBM",
    "MLP",
    "CNN",
    "RNN",
    "LSTM",
    "Transformer",
    "BERT",
    "DistilBERT",
    "TF-IDF + Logistic Regression",
];

/// Whether `model_name` is on the classification list (case-insensitive).
#[must_use]
pub fn is_classification_model(model_name: &str) -> bool {
    let name = model_name.trim();
    CLASSIFICATION_MODELS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
}

/// Family of model being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelCategory {
    /// Classical machine learning.
    #[default]
    #[serde(rename = "ML", alias = "ml")]
    Ml,
    /// Deep learning.
    #[serde(rename = "DL", alias = "dl")]
    Dl,
    /// Natural language processing.
    #[serde(rename = "NLP", alias = "nlp")]
    Nlp,
}

impl ModelCategory {
    /// Short label, as serialized.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ml => "ML",
            Self::Dl => "DL",
            Self::Nlp => "NLP",
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognised category string.
#[derive(Debug, Error)]
#[error("unknown model category `{0}` (expected ml, dl or nlp)")]
pub struct ParseCategoryError(String);

impl FromStr for ModelCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ml" | "machine-learning" => Ok(Self::Ml),
            "dl" | "deep-learning" => Ok(Self::Dl),
            "nlp" => Ok(Self::Nlp),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// Hyperparameter search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TuningMethod {
    /// Exhaustive grid.
    #[default]
    GridSearch,
    /// Random sampling of the grid.
    RandomSearch,
    /// Bayesian optimisation.
    Bayesian,
}

/// Hyperparameter tuning options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TuningConfig {
    /// Whether tuning runs; grants a flat accuracy bonus.
    pub enabled: bool,
    /// Search strategy.
    pub method: TuningMethod,
    /// Candidate values per hyperparameter.
    pub param_grid: IndexMap<String, Vec<Value>>,
}

/// Cross-validation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrossValidationConfig {
    /// Whether k-fold validation is used.
    pub enabled: bool,
    /// Number of folds.
    pub k_fold: u32,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            k_fold: 5,
        }
    }
}

impl CrossValidationConfig {
    /// Phrase used in the narrative explanation.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.enabled {
            format!("{}-fold cross-validation", self.k_fold)
        } else {
            "a standard split".to_string()
        }
    }
}

/// Model selection for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    /// Model family.
    pub category: ModelCategory,
    /// Display name, also decides classification vs regression.
    pub model_name: String,
    /// Column to predict; empty means unset.
    pub target_column: String,
    /// Free-form hyperparameters, echoed only.
    pub hyperparameters: IndexMap<String, Value>,
    /// Tuning options.
    pub tuning: TuningConfig,
    /// Cross-validation options.
    pub cross_validation: CrossValidationConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            category: ModelCategory::Ml,
            model_name: "Random Forest".to_string(),
            target_column: String::new(),
            hyperparameters: IndexMap::new(),
            tuning: TuningConfig::default(),
            cross_validation: CrossValidationConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Config for `model_name` predicting `target_column`, other options at defaults.
    #[must_use]
    pub fn new(
        category: ModelCategory,
        model_name: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            category,
            model_name: model_name.into(),
            target_column: target_column.into(),
            ..Self::default()
        }
    }

    /// Enables tuning.
    #[must_use]
    pub fn with_tuning(mut self, method: TuningMethod) -> Self {
        self.tuning.enabled = true;
        self.tuning.method = method;
        self
    }

    /// Enables k-fold cross-validation.
    #[must_use]
    pub fn with_cross_validation(mut self, k_fold: u32) -> Self {
        self.cross_validation = CrossValidationConfig {
            enabled: true,
            k_fold,
        };
        self
    }

    /// Whether the model is simulated as a classifier.
    #[must_use]
    pub fn is_classification(&self) -> bool {
        is_classification_model(&self.model_name)
    }
}

/// Missing value strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Imputation {
    /// Leave gaps.
    None,
    /// Column mean.
    #[default]
    Mean,
    /// Column median.
    Median,
    /// Most frequent value.
    Mode,
    /// Drop incomplete rows.
    DropRows,
}

/// Numeric scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scaling {
    /// No scaling.
    None,
    /// Zero mean, unit variance.
    #[default]
    Standard,
    /// Rescale into [0, 1].
    MinMax,
    /// Median / IQR.
    Robust,
}

/// Categorical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// One column per category.
    #[default]
    OneHot,
    /// Integer codes.
    Label,
    /// Mean target per category.
    Target,
}

/// Outlier treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutlierHandling {
    /// Keep outliers.
    #[default]
    None,
    /// Clip to the IQR fences.
    Clip,
    /// Remove outlier rows.
    Remove,
}

/// Class balancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassBalancing {
    /// No balancing.
    #[default]
    None,
    /// Synthetic minority oversampling.
    Smote,
    /// Random oversampling.
    RandomOversample,
    /// Random undersampling.
    RandomUndersample,
}

/// Feature engineering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureEngineering {
    /// None.
    #[default]
    None,
    /// Polynomial terms.
    Polynomial,
    /// Pairwise interactions.
    Interactions,
    /// Equal-width binning.
    Binning,
}

/// Text vectorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vectorizer {
    /// TF-IDF weights.
    #[default]
    Tfidf,
    /// Raw counts.
    Count,
    /// Pretrained embeddings.
    WordEmbeddings,
}

/// Text processing sub-options (NLP runs only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProcessing {
    /// Lowercase tokens.
    pub lowercase: bool,
    /// Drop stop words.
    pub remove_stopwords: bool,
    /// Porter stemming.
    pub stemming: bool,
    /// Dictionary lemmatization.
    pub lemmatization: bool,
    /// Vectorizer.
    pub vectorizer: Vectorizer,
    /// Vocabulary cap.
    pub max_features: u32,
}

impl Default for TextProcessing {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_stopwords: true,
            stemming: false,
            lemmatization: false,
            vectorizer: Vectorizer::Tfidf,
            max_features: 5000,
        }
    }
}

/// Preprocessing pipeline the run pretends to apply. Nothing here changes the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreprocessingConfig {
    /// Missing value strategy.
    pub imputation: Imputation,
    /// Numeric scaling.
    pub scaling: Scaling,
    /// Categorical encoding.
    pub encoding: Encoding,
    /// Outlier treatment.
    pub outliers: OutlierHandling,
    /// PCA before training.
    pub dimensionality_reduction: bool,
    /// Class balancing.
    pub class_balancing: ClassBalancing,
    /// Feature engineering.
    pub feature_engineering: FeatureEngineering,
    /// Text options.
    pub text: TextProcessing,
    /// Training share of the split, in (0, 1).
    pub split_ratio: f64,
    /// Columns excluded by the user.
    pub dropped_columns: Vec<String>,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            imputation: Imputation::Mean,
            scaling: Scaling::Standard,
            encoding: Encoding::OneHot,
            outliers: OutlierHandling::None,
            dimensionality_reduction: false,
            class_balancing: ClassBalancing::None,
            feature_engineering: FeatureEngineering::None,
            text: TextProcessing::default(),
            split_ratio: 0.8,
            dropped_columns: Vec::new(),
        }
    }
}

impl PreprocessingConfig {
    /// Human-readable list of the steps a run claims to have applied.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn describe_steps(&self, category: ModelCategory) -> Vec<String> {
        let mut steps = Vec::new();
        if !self.dropped_columns.is_empty() {
            steps.push(format!("Dropped columns: {}", self.dropped_columns.join(", ")));
        }
        match self.imputation {
            Imputation::None => {}
            Imputation::DropRows => steps.push("Dropped rows with missing values".into()),
            Imputation::Mean => steps.push("Imputed missing values with the column mean".into()),
            Imputation::Median => {
                steps.push("Imputed missing values with the column median".into());
            }
            Imputation::Mode => {
                steps.push("Imputed missing values with the most frequent value".into());
            }
        }
        match self.scaling {
            Scaling::None => {}
            Scaling::Standard => steps.push("Standardized numeric features".into()),
            Scaling::MinMax => steps.push("Min-max scaled numeric features".into()),
            Scaling::Robust => steps.push("Robust-scaled numeric features".into()),
        }
        steps.push(match self.encoding {
            Encoding::OneHot => "One-hot encoded categorical features".into(),
            Encoding::Label => "Label encoded categorical features".into(),
            Encoding::Target => "Target encoded categorical features".into(),
        });
        match self.outliers {
            OutlierHandling::None => {}
            OutlierHandling::Clip => steps.push("Clipped outliers to the IQR fences".into()),
            OutlierHandling::Remove => steps.push("Removed outlier rows".into()),
        }
        if self.dimensionality_reduction {
            steps.push("Reduced dimensionality with PCA".into());
        }
        match self.class_balancing {
            ClassBalancing::None => {}
            ClassBalancing::Smote => steps.push("Balanced classes with SMOTE".into()),
            ClassBalancing::RandomOversample => {
                steps.push("Balanced classes by random oversampling".into());
            }
            ClassBalancing::RandomUndersample => {
                steps.push("Balanced classes by random undersampling".into());
            }
        }
        match self.feature_engineering {
            FeatureEngineering::None => {}
            FeatureEngineering::Polynomial => steps.push("Added polynomial features".into()),
            FeatureEngineering::Interactions => {
                steps.push("Added pairwise interaction features".into());
            }
            FeatureEngineering::Binning => steps.push("Binned continuous features".into()),
        }
        if category == ModelCategory::Nlp {
            steps.push(self.text.describe());
        }
        let train = (self.split_ratio.clamp(0.05, 0.95) * 100.0).round() as u32;
        steps.push(format!("Split data {train}% train / {}% test", 100 - train));
        steps
    }
}

impl TextProcessing {
    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.lowercase {
            parts.push("lowercased");
        }
        if self.remove_stopwords {
            parts.push("stop words removed");
        }
        if self.stemming {
            parts.push("stemmed");
        }
        if self.lemmatization {
            parts.push("lemmatized");
        }
        let vectorizer = match self.vectorizer {
            Vectorizer::Tfidf => "TF-IDF",
            Vectorizer::Count => "count",
            Vectorizer::WordEmbeddings => "word-embedding",
        };
        if parts.is_empty() {
            format!(
                "Vectorized text with {vectorizer} ({} features)",
                self.max_features
            )
        } else {
            format!(
                "Text {}, vectorized with {vectorizer} ({} features)",
                parts.join(", "),
                self.max_features
            )
        }
    }
}

/// Both configuration objects, as stored in a JSON run file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Model selection.
    pub model: ModelConfig,
    /// Preprocessing selection.
    pub preprocessing: PreprocessingConfig,
}

impl RunConfig {
    /// Loads a run file.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }
}
