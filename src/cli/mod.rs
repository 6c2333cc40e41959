//! Command-line interface for training, serving and one-off predictions.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::load_config;
use crate::preprocessing::{CarFeatures, InputAligner};
use crate::server::ServerConfig;
use crate::training::{CarPriceTrainer, TrainingConfig};
use crate::utils::ModelLoader;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn kv(key: &str, val: &str) {
    println!("  {:<16} {}", muted(key), val.white());
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "car-price")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train and serve a used-car price model")]
#[command(long_about = None)]
pub struct Cli {
    /// YAML config with `paths` and `urls` sections
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train a model on the used-car CSV and save its artifacts
    Train {
        /// Input CSV file
        #[arg(short, long)]
        data: PathBuf,

        /// Directory for the model and column artifacts
        #[arg(short, long)]
        models_dir: Option<PathBuf>,

        /// Number of trees
        #[arg(long, default_value = "100")]
        n_estimators: usize,

        /// Maximum tree depth (unbounded when omitted)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Held-out fraction used for the R² score
        #[arg(long, default_value = "0.2")]
        test_split: f64,

        /// Seed for the split and the forest
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Start the prediction API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,

        #[arg(short, long)]
        models_dir: Option<PathBuf>,
    },

    /// Predict one record with the newest artifacts
    Predict {
        /// JSON object, or a path to a file containing one
        record: String,

        #[arg(short, long)]
        models_dir: Option<PathBuf>,
    },
}

/// Server settings from `--config` if given, else from the environment
pub fn resolve_server_config(config_path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match config_path {
        Some(path) => Ok(ServerConfig::from(&load_config(path)?)),
        None => Ok(ServerConfig::default()),
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_train(
    data_path: &Path,
    models_dir: &Path,
    n_estimators: usize,
    max_depth: Option<usize>,
    test_split: f64,
    seed: u64,
) -> anyhow::Result<()> {
    section("Train");

    let mut config = TrainingConfig::new(data_path)
        .with_models_dir(models_dir)
        .with_n_estimators(n_estimators)
        .with_test_split(test_split)
        .with_random_state(seed);
    if let Some(depth) = max_depth {
        config = config.with_max_depth(depth);
    }
    let trainer = CarPriceTrainer::new(config);

    step_run(&format!("Training random forest ({} trees)", n_estimators.to_string().as_str().cyan()));
    let start = Instant::now();
    let trained = trainer.train()?;
    step_done(&format!("{:?}", start.elapsed()));

    step_run("Saving artifacts");
    let paths = trained.save_model(models_dir)?;
    step_done(&models_dir.display().to_string());

    println!();
    println!("  {:<16} {}", muted("R²"), format!("{:.4}", trained.metrics.r2).white().bold());
    kv("RMSE", &format!("{:.2}", trained.metrics.rmse));
    kv("Train rows", &trained.n_train.to_string());
    kv("Test rows", &trained.metrics.n_samples.to_string());
    kv("Rows dropped", &trained.rows_dropped.to_string());
    kv("Columns", &trained.columns.len().to_string());
    kv("Model", &paths.model.display().to_string());
    kv("Column names", &paths.columns.display().to_string());
    println!();

    Ok(())
}

pub fn cmd_predict(record: &str, models_dir: &Path) -> anyhow::Result<()> {
    section("Predict");

    let json = if record.trim_start().starts_with('{') {
        record.to_string()
    } else {
        std::fs::read_to_string(record)?
    };
    let car: CarFeatures = serde_json::from_str(&json)?;

    step_run("Loading newest artifacts");
    let loaded = ModelLoader::latest(models_dir)?;
    step_done(&loaded.paths.model.display().to_string());

    let aligner = InputAligner::new(loaded.columns);
    let missing = aligner.missing_columns(&car);
    let row = aligner.align(&car);
    let prediction = loaded.model.predict(&row.to_matrix()?)?;
    let price = prediction
        .get(0)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("model returned no prediction"))?;

    println!();
    println!("  {:<16} {}", muted("Predicted price"), format!("{:.2}", price).white().bold());
    kv("Zero-filled", &format!("{} of {}", missing.len(), row.len()));
    println!();

    Ok(())
}

pub async fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    use crate::server::run_server;

    section("Serve");
    kv("Predict", &format!("http://{}:{}/predict", config.host, config.port));
    kv("Metrics", &format!("http://{}:{}/metrics", config.host, config.port));
    kv("Health", &format!("http://{}:{}/health", config.host, config.port));
    kv("Models", &config.models_dir.display().to_string());
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    run_server(config).await
}
