#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rust_2018_idioms,
    missing_docs
)]

//! Trainsim synthesis engine: ranks real feature/target correlations and turns them into a
//! mock training run whose metrics, curves, projections and explanations agree with each other.

/// Model and preprocessing configuration.
#[path = "../config.rs"]
pub mod config;

/// Feature impact ranking against a target column.
#[path = "../correlation.rs"]
pub mod correlation;

/// Result bundle definitions.
#[path = "../result.rs"]
pub mod result;

/// Constrained random generation of a training run.
#[path = "../synthesizer.rs"]
pub mod synthesizer;

/// Logging/event handle and RNG helpers.
#[path = "../telemetry.rs"]
pub mod telemetry;

/// Async training entry point.
#[path = "../engine.rs"]
pub mod engine;

pub use config::{ModelCategory, ModelConfig, PreprocessingConfig, RunConfig};
pub use correlation::{rank_feature_impacts, FeatureImpact};
pub use engine::{TrainingEngine, TrainingEngineBuilder};
pub use result::{ConfusionMatrix, Metrics, TrainingResult};
pub use synthesizer::{synthesize, synthesize_seeded};
pub use telemetry::{random_seed, seeded_rng, TrainingTelemetry, TrainingTelemetryBuilder};
