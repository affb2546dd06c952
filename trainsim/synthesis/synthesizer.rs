//! One mock training run, built in dependency order: target accuracy, confusion matrix,
//! metrics recomputed from the matrix, then every chart series derived from that accuracy
//! and from the ranked feature impacts.

use std::f64::consts::TAU;

use rand::Rng;
use trainsim_dataset::Dataset;
use uuid::Builder;

use crate::{
    config::{ModelCategory, ModelConfig, PreprocessingConfig},
    correlation::{rank_feature_impacts, FeatureImpact},
    result::{
        round_to, Attribution, ConfusionMatrix, CurvePoint, Direction, EpochRecord,
        FeatureImportance, LearningCurvePoint, Metrics, ProjectionPoint, RadarPoint,
        ResidualPoint, TrainingResult, WordWeight,
    },
    telemetry::seeded_rng,
};

/// Simulated hold-out set size.
pub const TEST_SET_SIZE: u32 = 200;
/// Lowest reachable accuracy.
pub const MIN_ACCURACY: f64 = 0.60;
/// Highest reachable accuracy.
pub const MAX_ACCURACY: f64 = 0.99;
/// Bonus for hyperparameter tuning.
pub const TUNING_BONUS: f64 = 0.05;
/// Top-impact stand-in when no features were ranked.
pub const NEUTRAL_CORRELATION: f64 = 0.5;

const CURVE_STEPS: u32 = 20;
const PROJECTION_POINTS: usize = 150;
const ATTRIBUTION_FEATURES: usize = 8;
const RESIDUAL_POINTS: usize = 50;
const LEARNING_CURVE_STEPS: u32 = 10;
const LAYER_ACTIVATIONS: usize = 20;
const WORD_CLOUD_VOCABULARY: [&str; 10] = [
    "data",
    "model",
    "learning",
    "feature",
    "training",
    "accuracy",
    "prediction",
    "neural",
    "network",
    "algorithm",
];

/// Baseline accuracy before tuning and data adjustments.
#[must_use]
pub const fn baseline_accuracy(category: ModelCategory) -> f64 {
    match category {
        ModelCategory::Dl => 0.88,
        ModelCategory::Ml | ModelCategory::Nlp => 0.82,
    }
}

/// Epochs in the simulated loss history.
#[must_use]
pub const fn epoch_count(category: ModelCategory) -> u32 {
    match category {
        ModelCategory::Dl => 30,
        ModelCategory::Ml | ModelCategory::Nlp => 20,
    }
}

/// Shift applied to the baseline from the strongest real correlation: `(max - 0.5) * 0.2`.
#[must_use]
pub fn accuracy_modifier(impacts: &[FeatureImpact]) -> f64 {
    let max_correlation = impacts
        .first()
        .map_or(NEUTRAL_CORRELATION, |top| top.impact.abs());
    (max_correlation - NEUTRAL_CORRELATION) * 0.2
}

/// Runs [`synthesize`] with a generator seeded from `seed` and records the seed.
#[must_use]
pub fn synthesize_seeded(
    seed: u64,
    dataset: &Dataset,
    model: &ModelConfig,
    preprocessing: &PreprocessingConfig,
) -> TrainingResult {
    let mut rng = seeded_rng(seed);
    let mut result = synthesize(&mut rng, dataset, model, preprocessing);
    result.seed = Some(seed);
    result
}

/// Produces a complete, internally consistent result bundle. Never fails: missing targets,
/// empty datasets and zero-variance columns fall back to neutral values.
#[must_use]
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    dataset: &Dataset,
    model: &ModelConfig,
    preprocessing: &PreprocessingConfig,
) -> TrainingResult {
    let impacts = rank_feature_impacts(dataset, &model.target_column);
    let target = target_accuracy(rng, model, &impacts);
    let confusion_matrix = build_confusion_matrix(rng, target);

    let mut metrics = Metrics::from_confusion(&confusion_matrix);
    let accuracy = metrics.accuracy;
    if model.is_classification() {
        metrics.auc = Some(round_to((accuracy + 0.02).min(1.0), 4));
    } else {
        let rmse = round_to((1.0 - accuracy) * rng.gen_range(1.5..2.5), 4);
        metrics.rmse = Some(rmse);
        metrics.mae = Some(round_to(rmse * rng.gen_range(0.7..0.85), 4));
    }

    let (roc_curve, precision_recall_curve) = curves(accuracy);
    let loss_history = loss_history(rng, model.category, target);
    let pca_components = projection(rng, 2.0 * accuracy, 1.5);
    let tsne_components = projection(rng, 4.0 * accuracy, 0.8);
    let umap_components = projection(rng, 5.0 * accuracy, 0.5);
    let shap_values = shap_values(rng, &impacts);
    let lime_values = lime_values(rng, &impacts);
    let residuals = residuals(rng, accuracy);
    let learning_curve = learning_curve(rng, accuracy, dataset.total_rows());
    let radar_data = radar_data(&metrics);
    let layer_activations = (0..LAYER_ACTIVATIONS)
        .map(|_| round_to(rng.gen::<f64>(), 4))
        .collect();
    let word_cloud = WORD_CLOUD_VOCABULARY
        .iter()
        .map(|word| WordWeight {
            text: (*word).to_string(),
            value: rng.gen_range(20..100),
        })
        .collect();
    let feature_importance = impacts
        .iter()
        .map(|impact| FeatureImportance {
            name: impact.name.clone(),
            importance: round_to(impact.impact.abs(), 4),
        })
        .collect();
    let explanation = explanation(model, accuracy, &confusion_matrix, &shap_values);
    let run_id = Builder::from_random_bytes(rng.gen()).into_uuid();

    TrainingResult {
        run_id,
        seed: None,
        model_name: model.model_name.clone(),
        model_category: model.category,
        metrics,
        confusion_matrix,
        feature_importance,
        loss_history,
        roc_curve,
        precision_recall_curve,
        residuals,
        learning_curve,
        radar_data,
        layer_activations,
        pca_components,
        tsne_components,
        umap_components,
        shap_values,
        lime_values,
        word_cloud,
        explanation,
        pipeline_summary: preprocessing.describe_steps(model.category),
    }
}

fn target_accuracy<R: Rng + ?Sized>(
    rng: &mut R,
    model: &ModelConfig,
    impacts: &[FeatureImpact],
) -> f64 {
    let bonus = if model.tuning.enabled {
        TUNING_BONUS
    } else {
        0.0
    };
    let noise = rng.gen_range(0.0..0.05);
    (baseline_accuracy(model.category) + bonus + accuracy_modifier(impacts) + noise)
        .clamp(MIN_ACCURACY, MAX_ACCURACY)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn build_confusion_matrix<R: Rng + ?Sized>(rng: &mut R, accuracy: f64) -> ConfusionMatrix {
    let total = f64::from(TEST_SET_SIZE);
    let correct = ((total * accuracy).round() as u32).min(TEST_SET_SIZE);
    let wrong = TEST_SET_SIZE - correct;
    let tp_share: f64 = rng.gen_range(0.5..0.6);
    let tp = (f64::from(correct) * tp_share).round() as u32;
    let fp_share: f64 = rng.gen_range(0.4..0.6);
    let fp = (f64::from(wrong) * fp_share).round() as u32;
    ConfusionMatrix::from_counts(tp, fp, wrong - fp, correct - tp)
}

fn curves(accuracy: f64) -> (Vec<CurvePoint>, Vec<CurvePoint>) {
    let steepness = accuracy.mul_add(4.0, 4.0);
    (0..=CURVE_STEPS)
        .map(|step| {
            let x = f64::from(step) / f64::from(CURVE_STEPS);
            let roc = if step == 0 {
                0.0
            } else {
                x.powf(1.0 / steepness).min(1.0)
            };
            let pr = (1.0 - x.powf(steepness)).max(0.0);
            (
                CurvePoint {
                    x: round_to(x, 2),
                    y: round_to(roc, 2),
                },
                CurvePoint {
                    x: round_to(x, 2),
                    y: round_to(pr, 2),
                },
            )
        })
        .unzip()
}

fn loss_history<R: Rng + ?Sized>(
    rng: &mut R,
    category: ModelCategory,
    target: f64,
) -> Vec<EpochRecord> {
    let ceiling = target + 0.02;
    let mut loss: f64 = 0.7;
    let mut acc = 0.5_f64.min(target);
    (1..=epoch_count(category))
        .map(|epoch| {
            loss = loss.mul_add(0.9, rng.gen_range(0.0..0.02)).max(0.1);
            acc = (ceiling - acc).mul_add(0.2, acc).min(ceiling);
            EpochRecord {
                epoch,
                loss: round_to(loss, 4),
                accuracy: round_to(acc, 4),
                val_loss: round_to(loss + 0.05, 4),
                val_accuracy: round_to(acc - 0.03, 4),
            }
        })
        .collect()
}

/// Standard normal draw via Box-Muller.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps the log argument in (0, 1].
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

fn jittered<R: Rng + ?Sized>(rng: &mut R, spread: f64, offset: f64) -> f64 {
    let base = standard_normal(rng).mul_add(spread, offset);
    (rng.gen::<f64>() - 0.5).mul_add(0.3, base)
}

/// Two clusters of 75 points, centred at `-separation` and `+separation` on both axes.
fn projection<R: Rng + ?Sized>(
    rng: &mut R,
    separation: f64,
    spread: f64,
) -> Vec<ProjectionPoint> {
    let half = PROJECTION_POINTS / 2;
    (0..PROJECTION_POINTS)
        .map(|idx| {
            let (offset, label) = if idx < half {
                (-separation, "Class 0")
            } else {
                (separation, "Class 1")
            };
            let x = jittered(rng, spread, offset);
            let y = jittered(rng, spread, offset);
            ProjectionPoint {
                x: round_to(x, 3),
                y: round_to(y, 3),
                label: label.to_string(),
            }
        })
        .collect()
}

fn shap_values<R: Rng + ?Sized>(rng: &mut R, impacts: &[FeatureImpact]) -> Vec<Attribution> {
    impacts
        .iter()
        .take(ATTRIBUTION_FEATURES)
        .map(|impact| Attribution {
            feature: impact.name.clone(),
            value: round_to(impact.impact.abs() * rng.gen_range(0.8..1.0), 4),
            direction: Direction::of(impact.impact),
        })
        .collect()
}

fn lime_values<R: Rng + ?Sized>(rng: &mut R, impacts: &[FeatureImpact]) -> Vec<Attribution> {
    impacts
        .iter()
        .take(ATTRIBUTION_FEATURES)
        .map(|impact| Attribution {
            feature: impact.name.clone(),
            value: round_to(impact.impact * rng.gen_range(0.5..1.0), 4),
            direction: Direction::of(impact.impact),
        })
        .collect()
}

fn residuals<R: Rng + ?Sized>(rng: &mut R, accuracy: f64) -> Vec<ResidualPoint> {
    let scale = (1.0 - accuracy) * 20.0;
    (0..RESIDUAL_POINTS)
        .map(|_| ResidualPoint {
            predicted: round_to(rng.gen_range(0.0..100.0), 2),
            residual: round_to(standard_normal(rng) * scale, 2),
        })
        .collect()
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn learning_curve<R: Rng + ?Sized>(
    rng: &mut R,
    accuracy: f64,
    total_rows: usize,
) -> Vec<LearningCurvePoint> {
    (1..=LEARNING_CURVE_STEPS)
        .map(|step| {
            let fraction = f64::from(step) / f64::from(LEARNING_CURVE_STEPS);
            let gap = 1.0 - fraction;
            let train_score = 0.1f64.mul_add(gap, accuracy + 0.02).clamp(0.0, 1.0);
            let validation_score =
                (0.25f64.mul_add(-gap, accuracy) + rng.gen_range(-0.01..0.01)).clamp(0.0, 1.0);
            LearningCurvePoint {
                train_size: (fraction * total_rows as f64).round() as usize,
                train_score: round_to(train_score, 4),
                validation_score: round_to(validation_score, 4),
            }
        })
        .collect()
}

fn radar_data(metrics: &Metrics) -> Vec<RadarPoint> {
    let fifth = metrics
        .auc
        .or_else(|| metrics.rmse.map(|rmse| 1.0 - rmse))
        .unwrap_or(metrics.accuracy);
    [
        ("Accuracy", metrics.accuracy),
        ("Precision", metrics.precision),
        ("Recall", metrics.recall),
        ("F1 Score", metrics.f1_score),
        ("AUC", fifth),
    ]
    .into_iter()
    .map(|(metric, value)| RadarPoint {
        metric: metric.to_string(),
        value: round_to(value.clamp(0.0, 1.0), 4),
    })
    .collect()
}

fn explanation(
    model: &ModelConfig,
    accuracy: f64,
    matrix: &ConfusionMatrix,
    shap: &[Attribution],
) -> String {
    let first = shap.first().map_or("n/a", |a| a.feature.as_str());
    let second = shap.get(1).map_or("n/a", |a| a.feature.as_str());
    format!(
        "{} reached {:.1}% accuracy, validated with {}. On the simulated hold-out set it \
         correctly identified {} positive and {} negative samples. SHAP ranks '{}' and '{}' \
         as the most influential features, and LIME's local explanation agrees with SHAP on \
         both their order and direction.",
        model.model_name,
        accuracy * 100.0,
        model.cross_validation.describe(),
        matrix.true_positives(),
        matrix.true_negatives(),
        first,
        second,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TuningMethod;
    use trainsim_dataset::{parse_csv, SampleDataset};

    fn iris() -> Dataset {
        SampleDataset::Iris.load().unwrap()
    }

    fn recomputed(matrix: &ConfusionMatrix) -> (f64, f64, f64, f64) {
        let tp = f64::from(matrix.true_positives());
        let fp = f64::from(matrix.false_positives());
        let fn_ = f64::from(matrix.false_negatives());
        let tn = f64::from(matrix.true_negatives());
        let precision = if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 };
        let recall = if tp + fn_ > 0.0 { tp / (tp + fn_) } else { 0.0 };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        (precision, recall, f1, (tp + tn) / 200.0)
    }

    #[test]
    fn bundle_is_consistent_across_seeds() {
        let dataset = iris();
        let configs = [
            ModelConfig::new(ModelCategory::Ml, "Random Forest", "species"),
            ModelConfig::new(ModelCategory::Dl, "LSTM", "species").with_tuning(TuningMethod::Bayesian),
            ModelConfig::new(ModelCategory::Nlp, "Linear Regression", "petal_width"),
            ModelConfig::new(ModelCategory::Ml, "Random Forest", ""),
        ];
        let preprocessing = PreprocessingConfig::default();
        for seed in 0..64 {
            for model in &configs {
                let result = synthesize_seeded(seed, &dataset, model, &preprocessing);
                let matrix = result.confusion_matrix;
                assert_eq!(matrix.total(), TEST_SET_SIZE);

                let (precision, recall, f1, accuracy) = recomputed(&matrix);
                let metrics = &result.metrics;
                assert!((metrics.precision - precision).abs() <= 1e-4);
                assert!((metrics.recall - recall).abs() <= 1e-4);
                assert!((metrics.f1_score - f1).abs() <= 1e-4);
                assert!((metrics.accuracy - accuracy).abs() <= 1e-4);
                assert!((MIN_ACCURACY..=MAX_ACCURACY).contains(&metrics.accuracy));

                assert_eq!(result.roc_curve.len(), 21);
                assert_eq!(result.precision_recall_curve.len(), 21);
                assert_eq!(result.roc_curve[0].y, 0.0);
                for (idx, (roc, pr)) in result
                    .roc_curve
                    .iter()
                    .zip(&result.precision_recall_curve)
                    .enumerate()
                {
                    let x = round_to(idx as f64 * 0.05, 2);
                    assert_eq!(roc.x, x);
                    assert_eq!(pr.x, x);
                    assert!((0.0..=1.0).contains(&roc.y));
                    assert!((0.0..=1.0).contains(&pr.y));
                }

                assert_eq!(
                    result.loss_history.len(),
                    epoch_count(model.category) as usize
                );
                assert!(result.loss_history.iter().all(|e| e.loss >= 0.1));
                assert!(result
                    .loss_history
                    .iter()
                    .all(|e| e.accuracy <= round_to(metrics.accuracy + 0.0225, 4)));

                for cloud in [
                    &result.pca_components,
                    &result.tsne_components,
                    &result.umap_components,
                ] {
                    assert_eq!(cloud.len(), 150);
                    assert!(cloud[..75].iter().all(|p| p.label == "Class 0"));
                    assert!(cloud[75..].iter().all(|p| p.label == "Class 1"));
                }
                assert_eq!(result.radar_data.len(), 5);
                assert!(result
                    .radar_data
                    .iter()
                    .all(|p| (0.0..=1.0).contains(&p.value)));
                assert_eq!(result.layer_activations.len(), 20);
                assert!(result
                    .layer_activations
                    .iter()
                    .all(|v| (0.0..=1.0).contains(v)));
                assert_eq!(result.word_cloud.len(), 10);
                assert!(result
                    .word_cloud
                    .iter()
                    .all(|w| (20..100).contains(&w.value)));
                assert_eq!(result.residuals.len(), 50);
                assert_eq!(result.learning_curve.len(), 10);
                assert_eq!(result.learning_curve[9].train_size, 30);
            }
        }
    }

    #[test]
    fn classification_reports_auc_regression_reports_errors() {
        let dataset = iris();
        let preprocessing = PreprocessingConfig::default();
        let classifier = synthesize_seeded(
            3,
            &dataset,
            &ModelConfig::new(ModelCategory::Ml, "SVM", "species"),
            &preprocessing,
        );
        let auc = classifier.metrics.auc.unwrap();
        assert!((auc - (classifier.metrics.accuracy + 0.02).min(1.0)).abs() < 1e-9);
        assert!(classifier.metrics.rmse.is_none());

        let regressor = synthesize_seeded(
            3,
            &dataset,
            &ModelConfig::new(ModelCategory::Ml, "Ridge", "petal_width"),
            &preprocessing,
        );
        assert!(regressor.metrics.auc.is_none());
        let rmse = regressor.metrics.rmse.unwrap();
        let mae = regressor.metrics.mae.unwrap();
        assert!(rmse > 0.0);
        assert!(mae <= rmse);
    }

    #[test]
    fn same_seed_same_bundle() {
        let dataset = iris();
        let model = ModelConfig::new(ModelCategory::Dl, "CNN", "species");
        let preprocessing = PreprocessingConfig::default();
        let a = synthesize_seeded(11, &dataset, &model, &preprocessing);
        let b = synthesize_seeded(11, &dataset, &model, &preprocessing);
        assert_eq!(a, b);
        let c = synthesize_seeded(12, &dataset, &model, &preprocessing);
        assert_ne!(a.run_id, c.run_id);
    }

    #[test]
    fn zero_signal_dataset_lowers_accuracy() {
        let dataset = parse_csv(
            "flat",
            "a,b,label\n1,x,1\n1,x,0\n1,x,1\n1,x,0\n1,x,1\n1,x,0\n",
        )
        .unwrap();
        let impacts = rank_feature_impacts(&dataset, "label");
        assert!(impacts.iter().all(|impact| impact.impact == 0.0));
        assert!((accuracy_modifier(&impacts) + 0.1).abs() < 1e-12);

        let model = ModelConfig::new(ModelCategory::Ml, "Random Forest", "label");
        for seed in 0..32 {
            let result =
                synthesize_seeded(seed, &dataset, &model, &PreprocessingConfig::default());
            // 0.82 - 0.1 + [0, 0.05), then snapped to a 200-sample grid.
            let accuracy = result.metrics.accuracy;
            assert!(accuracy >= 0.72 - 0.0025 && accuracy <= 0.77 + 0.0025);
            assert!(result.shap_values.iter().all(|s| s.value == 0.0));
        }
    }

    #[test]
    fn perfect_feature_leads_explanations() {
        let dataset = parse_csv(
            "perfect",
            "noise,mirror,target\n5,1,1\n2,2,2\n4,3,3\n9,4,4\n1,5,5\n7,6,6\n",
        )
        .unwrap();
        let impacts = rank_feature_impacts(&dataset, "target");
        assert_eq!(impacts[0].name, "mirror");
        assert!((impacts[0].impact - 1.0).abs() < 1e-12);

        let model = ModelConfig::new(ModelCategory::Ml, "XGBoost", "target");
        let result = synthesize_seeded(5, &dataset, &model, &PreprocessingConfig::default());
        assert_eq!(result.shap_values[0].feature, "mirror");
        assert_eq!(result.lime_values[0].feature, "mirror");
        assert!(result.lime_values[0].value > 0.0);
        assert!(result.explanation.contains("'mirror' and 'noise'"));
        assert!(result.explanation.contains("XGBoost"));
        assert!(result.explanation.contains("a standard split"));
    }

    #[test]
    fn empty_target_still_completes() {
        let dataset = iris();
        let model = ModelConfig::new(ModelCategory::Nlp, "BERT", "").with_cross_validation(5);
        let result = synthesize_seeded(9, &dataset, &model, &PreprocessingConfig::default());
        assert!(result.shap_values.is_empty());
        assert!(result.lime_values.is_empty());
        assert!(result.feature_importance.is_empty());
        assert_eq!(result.confusion_matrix.total(), TEST_SET_SIZE);
        // Neutral correlation: baseline only, plus noise.
        assert!(result.metrics.accuracy >= 0.82 - 0.0025);
        assert!(result.metrics.accuracy <= 0.87 + 0.0025);
        assert!(result.explanation.contains("'n/a' and 'n/a'"));
        assert!(result.explanation.contains("5-fold cross-validation"));
        assert!(result.pipeline_summary.iter().any(|s| s.contains("TF-IDF")));
    }

    #[test]
    fn attributions_keep_correlation_sign() {
        let dataset = parse_csv(
            "signs",
            "down,up,y\n10,1,1\n8,2,2\n7,3,3\n3,5,4\n1,4,5\n",
        )
        .unwrap();
        let model = ModelConfig::new(ModelCategory::Ml, "KNN", "y");
        let result = synthesize_seeded(21, &dataset, &model, &PreprocessingConfig::default());
        for (shap, lime) in result.shap_values.iter().zip(&result.lime_values) {
            assert_eq!(shap.feature, lime.feature);
            assert_eq!(shap.direction, lime.direction);
            assert!(shap.value >= 0.0);
            assert_eq!(lime.value < 0.0, lime.direction == Direction::Negative);
        }
        let down = result
            .shap_values
            .iter()
            .find(|s| s.feature == "down")
            .unwrap();
        assert_eq!(down.direction, Direction::Negative);
        assert!(down.signed_value() < 0.0);
    }

    #[test]
    fn tuning_and_deep_learning_raise_baseline() {
        assert!((baseline_accuracy(ModelCategory::Dl) - 0.88).abs() < f64::EPSILON);
        assert!((baseline_accuracy(ModelCategory::Nlp) - 0.82).abs() < f64::EPSILON);
        let dataset = parse_csv("flat", "a,label\n1,1\n1,0\n").unwrap();
        let tuned =
            ModelConfig::new(ModelCategory::Dl, "MLP", "label").with_tuning(TuningMethod::GridSearch);
        for seed in 0..16 {
            let result =
                synthesize_seeded(seed, &dataset, &tuned, &PreprocessingConfig::default());
            // 0.88 + 0.05 - 0.1 + [0, 0.05)
            assert!(result.metrics.accuracy >= 0.83 - 0.0025);
            assert!(result.metrics.accuracy <= 0.88 + 0.0025);
            assert_eq!(result.loss_history.len(), 30);
        }
    }

    #[test]
    fn projections_separate_with_accuracy() {
        let mut rng = seeded_rng(4);
        let points = projection(&mut rng, 5.0, 0.5);
        let mean = |slice: &[ProjectionPoint]| {
            slice.iter().map(|p| p.x).sum::<f64>() / slice.len() as f64
        };
        assert!(mean(&points[..75]) < -4.0);
        assert!(mean(&points[75..]) > 4.0);
    }

    #[test]
    fn loss_history_converges_on_target() {
        let mut rng = seeded_rng(1);
        let history = loss_history(&mut rng, ModelCategory::Dl, 0.9);
        assert_eq!(history.len(), 30);
        assert!(history.iter().all(|e| e.accuracy <= 0.92));
        assert!(history[0].accuracy > 0.5);
        assert!(history[29].accuracy > 0.9);
        assert!(history.windows(2).all(|w| w[1].accuracy >= w[0].accuracy));

        let weak = loss_history(&mut rng, ModelCategory::Ml, 0.3);
        assert_eq!(weak.len(), 20);
        assert!(weak.iter().all(|e| e.accuracy <= 0.32));
    }

    #[test]
    fn curves_are_steeper_for_better_models() {
        let (weak_roc, _) = curves(0.6);
        let (strong_roc, strong_pr) = curves(0.99);
        assert!(strong_roc[2].y >= weak_roc[2].y);
        assert_eq!(strong_roc[20].y, 1.0);
        assert_eq!(strong_pr[0].y, 1.0);
        assert_eq!(strong_pr[20].y, 0.0);
    }
}
