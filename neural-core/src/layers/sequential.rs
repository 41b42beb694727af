//! # Sequential
//!
//! Ordered composition of layers. Backward replays the forward pass to
//! recover each layer's original input, then walks the layers in reverse.

use super::Layer;
use crate::core::tensor::Tensor;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer (builder style)
    pub fn with(mut self, layer: impl Layer + 'static) -> Self {
        self.push(Box::new(layer));
        self
    }

    pub fn push(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// `input` followed by the output of every layer
    pub fn forward_trace(&self, input: &Tensor) -> Result<Vec<Tensor>> {
        let mut trace = Vec::with_capacity(self.layers.len() + 1);
        trace.push(input.clone());

        for layer in &self.layers {
            let next = layer.forward(&trace[trace.len() - 1])?;
            trace.push(next);
        }

        Ok(trace)
    }
}

impl Layer for Sequential {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let mut out = input.clone();
        for layer in &self.layers {
            out = layer.forward(&out)?;
        }
        Ok(out)
    }

    fn backward(&mut self, orig_input: &Tensor, grad_output: &Tensor) -> Result<Tensor> {
        let trace = self.forward_trace(orig_input)?;
        let inputs = &trace[..self.layers.len()];

        let mut grad = grad_output.clone();
        for (layer, input) in self.layers.iter_mut().zip(inputs).rev() {
            grad = layer.backward(input, &grad)?;
        }
        Ok(grad)
    }

    fn update_weights(&mut self, learning_rate: f64) -> Result<()> {
        for layer in &mut self.layers {
            layer.update_weights(learning_rate)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::multiply;
    use crate::error::NeuralError;
    use crate::layers::{LinearLayer, ReluLayer};

    fn mat(rows: &[&[f64]]) -> Tensor {
        Tensor::from_rows(rows).unwrap()
    }

    fn two_layer() -> Sequential {
        Sequential::new()
            .with(LinearLayer::new(&mat(&[&[1.0, -1.0], &[2.0, 1.0]]), false).unwrap())
            .with(ReluLayer::new())
            .with(LinearLayer::new(&mat(&[&[3.0], &[4.0]]), false).unwrap())
    }

    #[test]
    fn test_forward_chains_layers() {
        let model = two_layer();
        let x = mat(&[&[1.0, 1.0]]);

        // [1, 1] x W1 = [3, 0] -> relu -> [3, 0] x W2 = [9]
        assert_eq!(model.forward(&x).unwrap(), mat(&[&[9.0]]));
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_forward_trace() {
        let model = two_layer();
        let trace = model.forward_trace(&mat(&[&[1.0, 1.0]])).unwrap();

        assert_eq!(trace.len(), 4);
        assert_eq!(trace[1], mat(&[&[3.0, 0.0]]));
        assert_eq!(trace[3], mat(&[&[9.0]]));
    }

    #[test]
    fn test_backward_matches_manual_chain() {
        let mut model = two_layer();
        let x = mat(&[&[1.0, 1.0]]);

        let grad = model.backward(&x, &mat(&[&[1.0]])).unwrap();

        // dL/dh = [3, 4], relu masks the second unit, dL/dx = [3, 0] x W1^T
        let w1_t = mat(&[&[1.0, 2.0], &[-1.0, 1.0]]);
        assert_eq!(grad, multiply(&mat(&[&[3.0, 0.0]]), &w1_t).unwrap());
    }

    #[test]
    fn test_update_weights_requires_backward() {
        let mut model = two_layer();
        assert_eq!(model.update_weights(0.1), Err(NeuralError::EmptyAccumulator));

        model.backward(&mat(&[&[1.0, 1.0]]), &mat(&[&[1.0]])).unwrap();
        assert!(model.update_weights(0.1).is_ok());
    }
}
