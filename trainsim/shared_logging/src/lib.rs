#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! JSON-lines logging for trainsim: one record per line, fanned out to pluggable sinks.

use std::{
    fmt,
    fs::{self, File, OpenOptions},
    io::{LineWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Per-step detail.
    Debug,
    /// Run milestones.
    Info,
    /// Degraded but continuing.
    Warn,
    /// Failed operation.
    Error,
}

impl LogLevel {
    /// Upper-case name as written to the log.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(anyhow!("unknown log level `{other}`")),
        }
    }
}

/// One structured log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// UTC emission time.
    pub timestamp: DateTime<Utc>,
    /// Emitting component, e.g. `training-engine`.
    pub module: String,
    /// Severity.
    pub level: LogLevel,
    /// Dotted event name such as `training.start`.
    pub message: String,
    /// Extra fields; omitted from the line when empty.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl LogRecord {
    /// Stamps a record with the current time and no metadata.
    #[must_use]
    pub fn new(module: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            module: module.into(),
            level,
            message: message.into(),
            metadata: Map::new(),
        }
    }

    /// Replaces the metadata with `fields`. `null` is ignored and any other non-object value
    /// lands under the `value` key.
    #[must_use]
    pub fn with_metadata(mut self, fields: Value) -> Self {
        match fields {
            Value::Null => {}
            Value::Object(map) => self.metadata = map,
            scalar => {
                self.metadata.insert("value".to_string(), scalar);
            }
        }
        self
    }
}

/// Anything that can persist log records.
pub trait LogSink: Send + Sync {
    /// Stores one record.
    fn log(&self, record: &LogRecord) -> Result<()>;
}

/// Appends records to a JSON-lines file, dropping those below a minimum level.
#[derive(Debug)]
pub struct JsonLogger {
    path: PathBuf,
    min_level: LogLevel,
    out: Mutex<LineWriter<File>>,
}

impl JsonLogger {
    /// Opens `path` for appending, creating missing parent directories. Every level is kept.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(Self {
            path,
            min_level: LogLevel::Debug,
            out: Mutex::new(LineWriter::new(file)),
        })
    }

    /// Keeps only records at `level` or above.
    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Log file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowest level written.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl LogSink for JsonLogger {
    fn log(&self, record: &LogRecord) -> Result<()> {
        if record.level < self.min_level {
            return Ok(());
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        self.out
            .lock()
            .write_all(line.as_bytes())
            .with_context(|| format!("writing log file {}", self.path.display()))
    }
}

/// Keeps records in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    /// Empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clones every retained record.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Message names only.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }
}

impl LogSink for MemoryLogger {
    fn log(&self, record: &LogRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
