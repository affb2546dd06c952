#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Run lifecycle events (`training.started`, `training.completed`) and where they go:
//! an in-process broadcast bus or an append-only JSON-lines file.

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::broadcast};
use uuid::Uuid;

/// A single lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    /// Random v4 id.
    pub id: Uuid,
    /// Emitting component.
    pub source: String,
    /// Dotted kind, e.g. `training.completed`.
    pub kind: String,
    /// UTC emission time.
    pub timestamp: DateTime<Utc>,
    /// Event body.
    #[serde(default)]
    pub payload: Value,
}

impl RunEvent {
    /// New event with a fresh id, stamped now.
    #[must_use]
    pub fn new(source: impl Into<String>, kind: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            kind: kind.into(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Looks up a top-level payload field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

/// Destination for run events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Delivers one event.
    async fn publish(&self, event: RunEvent) -> Result<()>;
}

/// Broadcasts events to live subscribers and keeps the most recent `capacity` of them.
#[derive(Debug, Clone)]
pub struct MemoryEventBus {
    tx: broadcast::Sender<RunEvent>,
    history: Arc<Mutex<VecDeque<RunEvent>>>,
    capacity: usize,
}

impl MemoryEventBus {
    /// Bus retaining up to `capacity` events (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            history: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Retained events, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RunEvent> {
        self.history.lock().iter().cloned().collect()
    }

    /// Receiver for events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventPublisher for MemoryEventBus {
    async fn publish(&self, event: RunEvent) -> Result<()> {
        {
            let mut history = self.history.lock();
            while history.len() >= self.capacity {
                history.pop_front();
            }
            history.push_back(event.clone());
        }
        // Sending fails only when nobody listens.
        let _ = self.tx.send(event);
        Ok(())
    }
}

/// Appends each event as one JSON line.
#[derive(Debug, Clone)]
pub struct FileEventPublisher {
    path: PathBuf,
}

impl FileEventPublisher {
    /// Publisher for `path`; parent directories are created now, the file on first event.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating event directory {}", dir.display()))?;
        }
        Ok(Self { path })
    }

    /// Event file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventPublisher for FileEventPublisher {
    async fn publish(&self, event: RunEvent) -> Result<()> {
        let mut line = serde_json::to_string(&event)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("opening event file {}", self.path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn completed(accuracy: f64) -> RunEvent {
        RunEvent::new(
            "training-engine",
            "training.completed",
            json!({ "accuracy": accuracy }),
        )
    }

    #[tokio::test]
    async fn subscribers_see_new_events() {
        let bus = MemoryEventBus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(completed(0.9)).await.unwrap();
        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, "training.completed");
        assert_eq!(received.field("accuracy"), Some(&json!(0.9)));
    }

    #[tokio::test]
    async fn history_drops_oldest() {
        let bus = MemoryEventBus::new(2);
        for run in 0..3 {
            bus.publish(RunEvent::new("engine", format!("run.{run}"), Value::Null))
                .await
                .unwrap();
        }
        let kinds: Vec<String> = bus.snapshot().into_iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec!["run.1", "run.2"]);
    }

    #[tokio::test]
    async fn file_publisher_round_trips_lines() {
        let dir = tempdir().unwrap();
        let publisher = FileEventPublisher::new(dir.path().join("events/run.jsonl")).unwrap();
        let first = completed(0.8);
        publisher.publish(first.clone()).await.unwrap();
        publisher.publish(completed(0.85)).await.unwrap();
        let text = std::fs::read_to_string(publisher.path()).unwrap();
        let events: Vec<RunEvent> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], first);
        assert_ne!(events[0].id, events[1].id);
    }
}
