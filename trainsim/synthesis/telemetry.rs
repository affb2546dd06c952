use std::{fmt, path::PathBuf, sync::Arc};

use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::Value;
use shared_event_bus::{EventPublisher, RunEvent};
use shared_logging::{JsonLogger, LogLevel, LogRecord, LogSink};

/// Telemetry builder for training runs.
pub struct TrainingTelemetryBuilder {
    module: String,
    log_path: Option<PathBuf>,
    sinks: Vec<Arc<dyn LogSink>>,
    event_publisher: Option<Arc<dyn EventPublisher>>,
}

impl TrainingTelemetryBuilder {
    /// Creates a builder scoped to a module label.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            log_path: None,
            sinks: Vec::new(),
            event_publisher: None,
        }
    }

    /// Adds a JSON-lines log file.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Adds an arbitrary sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Sets the event publisher.
    #[must_use]
    pub fn event_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.event_publisher = Some(publisher);
        self
    }

    /// Builds telemetry, opening the log file if one was set.
    pub fn build(self) -> Result<TrainingTelemetry> {
        let mut sinks = self.sinks;
        if let Some(path) = self.log_path {
            sinks.push(Arc::new(JsonLogger::new(path)?));
        }
        Ok(TrainingTelemetry {
            inner: Arc::new(TelemetryInner {
                module: self.module,
                sinks,
                publisher: self.event_publisher,
            }),
        })
    }
}

/// Cloneable logging and event handle.
#[derive(Clone)]
pub struct TrainingTelemetry {
    inner: Arc<TelemetryInner>,
}

struct TelemetryInner {
    module: String,
    sinks: Vec<Arc<dyn LogSink>>,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl fmt::Debug for TrainingTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingTelemetry")
            .field("module", &self.inner.module)
            .field("sinks", &self.inner.sinks.len())
            .field("events", &self.inner.publisher.is_some())
            .finish()
    }
}

impl TrainingTelemetry {
    /// Returns a builder.
    #[must_use]
    pub fn builder(module: impl Into<String>) -> TrainingTelemetryBuilder {
        TrainingTelemetryBuilder::new(module)
    }

    /// Module label stamped on records and events.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.inner.module
    }

    /// Writes a record to every sink. The first sink error is returned after all sinks ran.
    pub fn log(&self, level: LogLevel, message: &str, metadata: Value) -> Result<()> {
        let record = LogRecord::new(&self.inner.module, level, message).with_metadata(metadata);
        let mut first_error = None;
        for sink in &self.inner.sinks {
            if let Err(err) = sink.log(&record) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Publishes an event if a publisher is attached.
    pub async fn event(&self, kind: &str, payload: Value) -> Result<()> {
        if let Some(publisher) = &self.inner.publisher {
            publisher
                .publish(RunEvent::new(&self.inner.module, kind, payload))
                .await?;
        }
        Ok(())
    }
}

/// Draws a fresh seed from the thread RNG.
#[must_use]
pub fn random_seed() -> u64 {
    rand::thread_rng().gen()
}

/// Returns a reproducible RNG.
#[must_use]
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
