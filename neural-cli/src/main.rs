//! neural - training driver for neural-core networks
//!
//! Trains a network described by a TOML file (or the built-in sample network)
//! and reports the average error of every epoch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use neural_core::prelude::*;
use neural_core::train::scalar;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "neural")]
#[command(version)]
#[command(about = "Train small dense networks with manual backpropagation", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "neural_core=trace")
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a network and print the error of every epoch
    Train {
        /// Training configuration (.toml); the sample network when omitted
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Override the configured number of epochs
        #[arg(short, long)]
        epochs: Option<usize>,

        /// Override the configured learning rate
        #[arg(short, long)]
        learning_rate: Option<f64>,

        /// Print the training report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the sample configuration as TOML
    Config,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Train {
            config,
            epochs,
            learning_rate,
            json,
        } => train_command(config.as_deref(), epochs, learning_rate, json),
        Commands::Config => config_command(),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read the configuration; validation waits until overrides are applied
fn load_config(path: Option<&Path>) -> Result<TrainingConfig> {
    match path {
        Some(path) => TrainingConfig::read(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(TrainingConfig::default()),
    }
}

fn train_command(
    path: Option<&Path>,
    epochs: Option<usize>,
    learning_rate: Option<f64>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(path)?;
    if let Some(epochs) = epochs {
        config.epochs = epochs;
    }
    if let Some(learning_rate) = learning_rate {
        config.learning_rate = learning_rate;
    }
    config.validate().context("invalid configuration")?;

    let mut model = config.build_model().context("building model")?;
    let dataset = config.dataset()?;

    tracing::info!(
        layers = model.len(),
        samples = dataset.len(),
        epochs = config.epochs,
        learning_rate = config.learning_rate,
        "training"
    );

    let report = config
        .trainer()
        .fit(&mut model, &SquaredErrorLoss, &dataset)
        .context("training failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Epochs".bold());
    for (epoch, error) in report.epoch_errors.iter().enumerate() {
        println!("  {:>5}  {:.6}", epoch.to_string().cyan(), error);
    }

    println!();
    println!("{}", "Predictions".bold());
    for sample in &dataset {
        let prediction = scalar(&model.forward(&sample.input)?)?;
        println!(
            "  {}  {:>9.5}  (target {})",
            format!("{:?}", sample.input.data()).cyan(),
            prediction,
            sample.target
        );
    }

    println!();
    let trend = if report.is_non_increasing() {
        "non-increasing".green()
    } else {
        "fluctuating".yellow()
    };
    println!(
        "{} {:.6} -> {:.6} ({})",
        "Average error".bold(),
        report.initial_error().unwrap_or_default(),
        report.final_error().unwrap_or_default(),
        trend
    );

    Ok(())
}

fn config_command() -> Result<()> {
    print!("{}", TrainingConfig::default().to_toml_string()?);
    Ok(())
}
