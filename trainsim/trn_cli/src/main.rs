use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use shared_event_bus::FileEventPublisher;
use shared_logging::{JsonLogger, LogLevel};
use tokio::runtime::Runtime;
use trainsim_dataset::{
    column_stats, correlation_matrix, histogram, load_csv, value_counts, CellValue, ColumnInfo,
    ColumnStats, CorrelationMatrix, Dataset, HistogramBin, SampleDataset, ValueCount,
};
use trainsim_synthesis::{
    ModelCategory, RunConfig, TrainingEngine, TrainingResult, TrainingTelemetry,
};

#[derive(Parser, Debug)]
#[command(name = "trainsim", version, about = "Mock model training and dataset exploration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a mock training job and prints the result bundle.
    Train(TrainArgs),
    /// Summarizes a dataset: column stats, distributions, correlations.
    Explore(ExploreArgs),
    /// Lists bundled sample datasets.
    Samples,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// CSV file with a header row.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Bundled sample (`iris`, `reviews`).
    #[arg(long)]
    sample: Option<SampleDataset>,
}

impl SourceArgs {
    fn load(&self) -> Result<Dataset> {
        match (&self.data, self.sample) {
            (Some(path), _) => {
                load_csv(path).with_context(|| format!("loading dataset {}", path.display()))
            }
            (None, Some(sample)) => Ok(sample.load()?),
            (None, None) => bail!("either --data or --sample is required"),
        }
    }
}

#[derive(Args, Debug)]
struct TrainArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// JSON run file with `model` and `preprocessing` sections.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    target: Option<String>,
    /// ml, dl or nlp.
    #[arg(long)]
    category: Option<ModelCategory>,
    #[arg(long)]
    model: Option<String>,
    /// Enables hyperparameter tuning.
    #[arg(long)]
    tuning: bool,
    #[arg(long, value_parser = clap::value_parser!(u32).range(2..))]
    kfold: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1500)]
    latency_ms: u64,
    /// JSON-lines log file.
    #[arg(long)]
    log: Option<PathBuf>,
    /// Lowest level written to `--log`.
    #[arg(long, default_value = "debug")]
    log_level: LogLevel,
    /// JSON-lines event file.
    #[arg(long)]
    event_log: Option<PathBuf>,
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct ExploreArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Column to break down; all columns are summarized when omitted.
    #[arg(long)]
    column: Option<String>,
    #[arg(long, default_value_t = 10)]
    bins: usize,
    #[arg(long)]
    log: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreReport<'a> {
    dataset: &'a str,
    total_rows: usize,
    columns: &'a [ColumnInfo],
    stats: Vec<ColumnStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    histogram: Option<Vec<HistogramBin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_counts: Option<Vec<ValueCount>>,
    correlation: CorrelationMatrix,
}

/// Log and event outputs shared by every telemetry handle of one invocation.
struct Outputs {
    logger: Option<Arc<JsonLogger>>,
    events: Option<Arc<FileEventPublisher>>,
}

impl Outputs {
    fn open(log: Option<&Path>, level: LogLevel, event_log: Option<&Path>) -> Result<Self> {
        let logger = log
            .map(|path| {
                JsonLogger::new(path)
                    .with_context(|| format!("opening log {}", path.display()))
                    .map(|logger| Arc::new(logger.with_min_level(level)))
            })
            .transpose()?;
        let events = event_log
            .map(FileEventPublisher::new)
            .transpose()?
            .map(Arc::new);
        Ok(Self { logger, events })
    }

    fn telemetry(&self, module: &str) -> Result<TrainingTelemetry> {
        let mut builder = TrainingTelemetry::builder(module);
        if let Some(logger) = &self.logger {
            builder = builder.sink(logger.clone());
        }
        if let Some(events) = &self.events {
            builder = builder.event_publisher(events.clone());
        }
        builder.build()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Train(args) => {
            let result = run_train(&args)?;
            print_json(&result, args.pretty)
        }
        Commands::Explore(args) => {
            let dataset = args.source.load()?;
            let report = explore_report(&dataset, args.column.as_deref(), args.bins)?;
            let outputs = Outputs::open(args.log.as_deref(), args.log_level, None)?;
            outputs.telemetry("trainsim-cli")?.log(
                LogLevel::Info,
                "cli.explore",
                json!({
                    "dataset": dataset.name(),
                    "rows": dataset.total_rows(),
                    "column": args.column,
                }),
            )?;
            print_json(&report, args.pretty)
        }
        Commands::Samples => {
            for sample in SampleDataset::ALL {
                let dataset = sample.load()?;
                println!(
                    "{} | {} rows | target {} | {}",
                    sample,
                    dataset.total_rows(),
                    sample.suggested_target(),
                    sample.description()
                );
            }
            Ok(())
        }
    }
}

fn run_train(args: &TrainArgs) -> Result<TrainingResult> {
    let dataset = args.source.load()?;
    let config = resolve_run_config(args)?;
    let outputs = Outputs::open(args.log.as_deref(), args.log_level, args.event_log.as_deref())?;
    outputs.telemetry("trainsim-cli")?.log(
        LogLevel::Info,
        "cli.train",
        json!({
            "dataset": dataset.name(),
            "rows": dataset.total_rows(),
            "model": config.model.model_name,
            "category": config.model.category,
            "target": config.model.target_column,
        }),
    )?;

    let mut builder = TrainingEngine::builder()
        .telemetry(outputs.telemetry("training-engine")?)
        .latency(Duration::from_millis(args.latency_ms));
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let engine = builder.build()?;
    let runtime = Runtime::new().context("starting tokio runtime")?;
    Ok(runtime.block_on(engine.train(&dataset, &config.model, &config.preprocessing)))
}

/// Run file (if any) with command-line overrides applied. A sample without an explicit
/// target trains against the sample's suggested target.
fn resolve_run_config(args: &TrainArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(category) = args.category {
        config.model.category = category;
    }
    if let Some(model) = &args.model {
        config.model.model_name.clone_from(model);
    }
    if let Some(target) = &args.target {
        config.model.target_column.clone_from(target);
    } else if config.model.target_column.is_empty() {
        if let Some(sample) = args.source.sample {
            config.model.target_column = sample.suggested_target().to_string();
        }
    }
    if args.tuning {
        config.model.tuning.enabled = true;
    }
    if let Some(k_fold) = args.kfold {
        config.model = config.model.with_cross_validation(k_fold);
    }
    Ok(config)
}

fn explore_report<'a>(
    dataset: &'a Dataset,
    column: Option<&str>,
    bins: usize,
) -> Result<ExploreReport<'a>> {
    let mut report = ExploreReport {
        dataset: dataset.name(),
        total_rows: dataset.total_rows(),
        columns: dataset.columns(),
        stats: Vec::new(),
        histogram: None,
        value_counts: None,
        correlation: correlation_matrix(dataset),
    };
    match column {
        Some(name) => {
            let info = dataset.require_column(name)?;
            report.stats.extend(column_stats(dataset, name));
            if info.is_numeric() {
                let values: Vec<f64> = dataset
                    .column_values(name)
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(CellValue::as_number)
                    .collect();
                report.histogram = Some(histogram(&values, bins));
            } else {
                report.value_counts = value_counts(dataset, name);
            }
        }
        None => {
            report.stats = dataset
                .columns()
                .iter()
                .filter_map(|info| column_stats(dataset, &info.name))
                .collect();
        }
    }
    Ok(report)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
