use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use shared_logging::LogLevel;
use trainsim_dataset::Dataset;

use crate::{
    config::{ModelConfig, PreprocessingConfig},
    result::TrainingResult,
    synthesizer::synthesize_seeded,
    telemetry::{random_seed, TrainingTelemetry},
};

/// Simulated training time before a result is produced.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// Runs mock training jobs: waits out the simulated latency, then synthesizes a result.
#[derive(Debug)]
pub struct TrainingEngine {
    telemetry: Option<TrainingTelemetry>,
    seed: Option<u64>,
    latency: Duration,
}

impl TrainingEngine {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> TrainingEngineBuilder {
        TrainingEngineBuilder::default()
    }

    /// Trains against `dataset`. Never fails; telemetry errors are dropped.
    pub async fn train(
        &self,
        dataset: &Dataset,
        model: &ModelConfig,
        preprocessing: &PreprocessingConfig,
    ) -> TrainingResult {
        let seed = self.seed.unwrap_or_else(random_seed);
        if let Some(telemetry) = &self.telemetry {
            let _ = telemetry.log(
                LogLevel::Info,
                "training.start",
                json!({
                    "dataset": dataset.name(),
                    "rows": dataset.total_rows(),
                    "model": model.model_name,
                    "category": model.category,
                    "target": model.target_column,
                    "seed": seed,
                }),
            );
            let _ = telemetry
                .event(
                    "training.started",
                    json!({ "model": model.model_name, "seed": seed }),
                )
                .await;
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = synthesize_seeded(seed, dataset, model, preprocessing);

        if let Some(telemetry) = &self.telemetry {
            if result.shap_values.is_empty() {
                let _ = telemetry.log(
                    LogLevel::Warn,
                    "training.no_impacts",
                    json!({ "target": model.target_column }),
                );
            } else {
                let _ = telemetry.log(
                    LogLevel::Debug,
                    "training.impacts_ranked",
                    json!({
                        "features": result.feature_importance.len(),
                        "top": result.shap_values[0].feature,
                    }),
                );
            }
            let _ = telemetry.log(
                LogLevel::Info,
                "training.complete",
                json!({
                    "run_id": result.run_id,
                    "accuracy": result.metrics.accuracy,
                    "f1": result.metrics.f1_score,
                }),
            );
            let _ = telemetry
                .event(
                    "training.completed",
                    json!({
                        "run_id": result.run_id,
                        "model": result.model_name,
                        "category": result.model_category,
                        "accuracy": result.metrics.accuracy,
                        "seed": seed,
                    }),
                )
                .await;
        }
        result
    }

    /// Returns telemetry handle.
    #[must_use]
    pub const fn telemetry(&self) -> Option<&TrainingTelemetry> {
        self.telemetry.as_ref()
    }

    /// Fixed seed, if one was configured.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Simulated training latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }
}

/// Builder for `TrainingEngine`.
#[derive(Debug)]
pub struct TrainingEngineBuilder {
    telemetry: Option<TrainingTelemetry>,
    seed: Option<u64>,
    latency: Duration,
}

impl TrainingEngineBuilder {
    /// Sets telemetry.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TrainingTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Pins every run to one seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the simulated latency; zero skips the wait.
    #[must_use]
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Builds the engine.
    pub fn build(self) -> Result<TrainingEngine> {
        Ok(TrainingEngine {
            telemetry: self.telemetry,
            seed: self.seed,
            latency: self.latency,
        })
    }
}

impl Default for TrainingEngineBuilder {
    fn default() -> Self {
        Self {
            telemetry: None,
            seed: None,
            latency: DEFAULT_LATENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelCategory;
    use shared_event_bus::MemoryEventBus;
    use shared_logging::MemoryLogger;
    use std::sync::Arc;
    use trainsim_dataset::SampleDataset;

    #[tokio::test]
    async fn engine_logs_and_publishes() {
        let bus = Arc::new(MemoryEventBus::new(8));
        let memory = Arc::new(MemoryLogger::new());
        let telemetry = TrainingTelemetry::builder("training-engine")
            .sink(memory.clone())
            .event_publisher(bus.clone())
            .build()
            .unwrap();
        let engine = TrainingEngine::builder()
            .telemetry(telemetry)
            .seed(42)
            .latency(Duration::ZERO)
            .build()
            .unwrap();
        let dataset = SampleDataset::Iris.load().unwrap();
        let model = ModelConfig::new(ModelCategory::Ml, "Random Forest", "species");
        let result = engine
            .train(&dataset, &model, &PreprocessingConfig::default())
            .await;

        assert_eq!(result.seed, Some(42));
        assert_eq!(
            memory.messages(),
            vec!["training.start", "training.impacts_ranked", "training.complete"]
        );
        let kinds: Vec<_> = bus.snapshot().into_iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec!["training.started", "training.completed"]);
    }

    #[tokio::test]
    async fn fixed_seed_matches_direct_synthesis() {
        let engine = TrainingEngine::builder()
            .seed(7)
            .latency(Duration::ZERO)
            .build()
            .unwrap();
        let dataset = SampleDataset::Reviews.load().unwrap();
        let model = ModelConfig::new(ModelCategory::Nlp, "BERT", "sentiment");
        let preprocessing = PreprocessingConfig::default();
        let result = engine.train(&dataset, &model, &preprocessing).await;
        assert_eq!(result, synthesize_seeded(7, &dataset, &model, &preprocessing));
    }

    #[tokio::test]
    async fn unseeded_runs_record_their_seed() {
        let engine = TrainingEngine::builder()
            .latency(Duration::ZERO)
            .build()
            .unwrap();
        assert!(engine.telemetry().is_none());
        let dataset = SampleDataset::Iris.load().unwrap();
        let model = ModelConfig::new(ModelCategory::Dl, "CNN", "");
        let result = engine
            .train(&dataset, &model, &PreprocessingConfig::default())
            .await;
        assert!(result.seed.is_some());
        assert!(result.shap_values.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn default_latency_is_simulated() {
        let engine = TrainingEngine::builder().seed(1).build().unwrap();
        assert_eq!(engine.latency(), DEFAULT_LATENCY);
        let dataset = SampleDataset::Iris.load().unwrap();
        let model = ModelConfig::new(ModelCategory::Ml, "SVM", "species");
        let started = tokio::time::Instant::now();
        engine
            .train(&dataset, &model, &PreprocessingConfig::default())
            .await;
        assert!(started.elapsed() >= DEFAULT_LATENCY);
    }
}
