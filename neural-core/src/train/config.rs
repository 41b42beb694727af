//! # Training Configuration
//!
//! Network layout, dataset and hyper-parameters, read from TOML:
//!
//! ```toml
//! epochs = 100
//! learning_rate = 0.1
//!
//! [[layers]]
//! kind = "linear"
//! shape = [2, 1]
//! weights = [-0.5, 1.2]
//! bias = true
//!
//! [[layers]]
//! kind = "relu"
//!
//! [[samples]]
//! input = [1.0, 0.0]
//! target = 0.0
//! ```
//!
//! [`TrainingConfig::default`] is a small two-layer network fitting a
//! non-linear three-point dataset.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::trainer::{Sample, Trainer};
use crate::core::tensor::Tensor;
use crate::error::{NeuralError, Result};
use crate::layers::{LinearLayer, ReluLayer, Sequential};

fn default_epochs() -> usize {
    100
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_bias() -> bool {
    true
}

/// One layer of the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerConfig {
    Linear {
        /// `[in_features, out_features]`
        shape: [usize; 2],
        /// Row-major initial weights
        weights: Vec<f64>,
        #[serde(default = "default_bias")]
        bias: bool,
    },
    Relu,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    pub input: Vec<f64>,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    pub layers: Vec<LayerConfig>,

    pub samples: Vec<SampleConfig>,
}

impl TrainingConfig {
    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file without validating it
    ///
    /// For callers that adjust fields before calling [`validate`](Self::validate).
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NeuralError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check hyper-parameters, weight counts and sample widths
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(NeuralError::Config("epochs must be at least 1".into()));
        }
        if !self.learning_rate.is_finite() {
            return Err(NeuralError::Config(format!(
                "learning_rate must be finite, got {}",
                self.learning_rate
            )));
        }
        if self.layers.is_empty() {
            return Err(NeuralError::Config("at least one layer is required".into()));
        }
        if self.samples.is_empty() {
            return Err(NeuralError::Config("at least one sample is required".into()));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if let LayerConfig::Linear { shape, weights, .. } = layer {
                let expected = shape[0] * shape[1];
                if weights.len() != expected {
                    return Err(NeuralError::Config(format!(
                        "layer {}: shape {:?} needs {} weights, got {}",
                        i,
                        shape,
                        expected,
                        weights.len()
                    )));
                }
            }
        }

        let width = self.samples[0].input.len();
        if let Some(i) = self.samples.iter().position(|s| s.input.len() != width) {
            return Err(NeuralError::Config(format!(
                "sample {}: input has {} values, sample 0 has {}",
                i,
                self.samples[i].input.len(),
                width
            )));
        }

        Ok(())
    }

    /// Instantiate the configured layers in order
    pub fn build_model(&self) -> Result<Sequential> {
        let mut model = Sequential::new();

        for layer in &self.layers {
            match layer {
                LayerConfig::Linear {
                    shape,
                    weights,
                    bias,
                } => {
                    let weights = Tensor::new(shape.to_vec(), weights.clone())?;
                    model.push(Box::new(LinearLayer::new(&weights, *bias)?));
                }
                LayerConfig::Relu => model.push(Box::new(ReluLayer::new())),
            }
        }

        Ok(model)
    }

    /// Samples as `[1, width]` input rows
    pub fn dataset(&self) -> Result<Vec<Sample>> {
        self.samples
            .iter()
            .map(|s| {
                let input = Tensor::new(vec![1, s.input.len()], s.input.clone())?;
                Ok(Sample::new(input, s.target))
            })
            .collect()
    }

    pub fn trainer(&self) -> Trainer {
        Trainer::new(self.epochs, self.learning_rate)
    }
}

impl FromStr for TrainingConfig {
    type Err = NeuralError;

    /// Parse and validate TOML
    fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            learning_rate: default_learning_rate(),
            layers: vec![
                LayerConfig::Linear {
                    shape: [2, 2],
                    weights: vec![-0.5, 1.2, 0.6, -0.8],
                    bias: true,
                },
                LayerConfig::Relu,
                LayerConfig::Linear {
                    shape: [2, 1],
                    weights: vec![-0.5, 1.2],
                    bias: true,
                },
            ],
            samples: vec![
                SampleConfig {
                    input: vec![1.0, 1.0],
                    target: 1.0,
                },
                SampleConfig {
                    input: vec![1.0, 0.0],
                    target: 0.0,
                },
                SampleConfig {
                    input: vec![0.0, 1.0],
                    target: -1.0,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Layer;

    const MINIMAL: &str = r#"
[[layers]]
kind = "linear"
shape = [1, 1]
weights = [2.0]
bias = false

[[samples]]
input = [3.0]
target = 1.0
"#;

    #[test]
    fn test_parse_minimal_uses_defaults() {
        let config: TrainingConfig = MINIMAL.parse().unwrap();

        assert_eq!(config.epochs, 100);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(
            config.layers,
            vec![LayerConfig::Linear {
                shape: [1, 1],
                weights: vec![2.0],
                bias: false,
            }]
        );
        assert_eq!(config.samples.len(), 1);
    }

    #[test]
    fn test_bias_defaults_to_true() {
        let content = r#"
[[layers]]
kind = "linear"
shape = [1, 1]
weights = [2.0]

[[layers]]
kind = "relu"

[[samples]]
input = [3.0]
target = 1.0
"#;
        let config: TrainingConfig = content.parse().unwrap();
        assert!(matches!(config.layers[0], LayerConfig::Linear { bias: true, .. }));
        assert_eq!(config.layers[1], LayerConfig::Relu);
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = TrainingConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed: TrainingConfig = text.parse().unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_wrong_weight_count() {
        let content = MINIMAL.replace("weights = [2.0]", "weights = [2.0, 3.0]");
        assert!(matches!(
            content.parse::<TrainingConfig>(),
            Err(NeuralError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_ragged_samples() {
        let mut config = TrainingConfig::default();
        config.samples[2].input.push(4.0);
        assert!(matches!(config.validate(), Err(NeuralError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_epochs() {
        let content = format!("epochs = 0\n{}", MINIMAL);
        assert!(matches!(
            content.parse::<TrainingConfig>(),
            Err(NeuralError::Config(_))
        ));
    }

    #[test]
    fn test_read_defers_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.toml");
        std::fs::write(&path, format!("epochs = 0\n{}", MINIMAL)).unwrap();

        assert!(matches!(
            TrainingConfig::from_file(&path),
            Err(NeuralError::Config(_))
        ));

        let mut config = TrainingConfig::read(&path).unwrap();
        assert_eq!(config.epochs, 0);
        config.epochs = 5;
        config.validate().unwrap();
        assert_eq!(config.trainer().epochs(), 5);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TrainingConfig::read(&dir.path().join("missing.toml")),
            Err(NeuralError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_layer_kind() {
        let content = MINIMAL.replace("kind = \"linear\"", "kind = \"conv\"");
        assert!(matches!(
            content.parse::<TrainingConfig>(),
            Err(NeuralError::Config(_))
        ));
    }

    #[test]
    fn test_build_model_and_dataset() {
        let config = TrainingConfig::default();
        let model = config.build_model().unwrap();
        let dataset = config.dataset().unwrap();

        assert_eq!(model.len(), 3);
        assert_eq!(model.layers()[1].name(), "relu");
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset[0].input.shape(), &[1, 2]);
        assert_eq!(dataset[2].target, -1.0);
    }
}
