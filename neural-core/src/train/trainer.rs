//! # Trainer
//!
//! Per-example forward/backward with one weight update per epoch.
//!
//! Each epoch runs every sample through `forward`, scores the scalar
//! prediction with the loss, sends the loss gradient back through
//! `backward`, and finally applies `update_weights` once with the gradients
//! averaged over the epoch.

use serde::Serialize;

use crate::core::loss::Loss;
use crate::core::tensor::Tensor;
use crate::error::{NeuralError, Result};
use crate::layers::Layer;

/// One training example: a `[1, in_features]` row and a scalar target
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Tensor,
    pub target: f64,
}

impl Sample {
    pub fn new(input: Tensor, target: f64) -> Self {
        Self { input, target }
    }
}

/// Average error of every epoch, measured before that epoch's update
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingReport {
    pub epoch_errors: Vec<f64>,
}

impl TrainingReport {
    pub fn initial_error(&self) -> Option<f64> {
        self.epoch_errors.first().copied()
    }

    pub fn final_error(&self) -> Option<f64> {
        self.epoch_errors.last().copied()
    }

    /// True when no epoch's error exceeds the one before it
    pub fn is_non_increasing(&self) -> bool {
        self.epoch_errors.windows(2).all(|w| w[1] <= w[0])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trainer {
    epochs: usize,
    learning_rate: f64,
}

impl Trainer {
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        Self {
            epochs,
            learning_rate,
        }
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Train `model` on `samples`
    pub fn fit<L: Loss + ?Sized>(
        &self,
        model: &mut dyn Layer,
        loss: &L,
        samples: &[Sample],
    ) -> Result<TrainingReport> {
        if samples.is_empty() {
            return Err(NeuralError::InvalidInput("no training samples".into()));
        }
        if !self.learning_rate.is_finite() {
            return Err(NeuralError::InvalidInput(format!(
                "learning rate must be finite, got {}",
                self.learning_rate
            )));
        }

        let mut report = TrainingReport::default();

        for epoch in 0..self.epochs {
            let mut total = 0.0;
            for (iter, sample) in samples.iter().enumerate() {
                let error = self.step(model, loss, sample)?;
                tracing::trace!(epoch, iter, error, "iteration complete");
                total += error;
            }

            let avg_error = total / samples.len() as f64;
            tracing::info!(epoch, avg_error, "epoch complete");
            report.epoch_errors.push(avg_error);

            model.update_weights(self.learning_rate)?;
        }

        Ok(report)
    }

    /// Forward, loss, backward for one sample; returns its error
    fn step<L: Loss + ?Sized>(
        &self,
        model: &mut dyn Layer,
        loss: &L,
        sample: &Sample,
    ) -> Result<f64> {
        let prediction = scalar(&model.forward(&sample.input)?)?;
        tracing::debug!(prediction, target = sample.target, "prediction");

        let error = loss.forward(prediction, sample.target);
        let grad = Tensor::new(vec![1, 1], vec![loss.backward(prediction, sample.target)])?;
        model.backward(&sample.input, &grad)?;

        Ok(error)
    }
}

/// The single value of a `[1, 1]` model output
pub fn scalar(output: &Tensor) -> Result<f64> {
    if output.shape() != [1, 1] {
        return Err(NeuralError::InvalidInput(format!(
            "expected a [1, 1] prediction, got {:?}",
            output.shape()
        )));
    }
    output.at(&[0, 0])
}
