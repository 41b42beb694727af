//! # Training
//!
//! - **config**: TOML description of a network, dataset and hyper-parameters
//! - **trainer**: the epoch/sample loop driving forward, loss, backward and updates

pub mod config;
pub mod trainer;

pub use config::{LayerConfig, SampleConfig, TrainingConfig};
pub use trainer::{scalar, Sample, Trainer, TrainingReport};
