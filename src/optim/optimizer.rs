use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, layers::dense::Layer};
use super::{adam::Adam, sgd::Sgd};

/// Applies averaged mini-batch gradients to the layers of a network.
pub trait Optimizer {
    /// Called once per mini-batch, before any `update`.
    fn begin_step(&mut self) {}

    /// Updates layer `index` in place from its gradients.
    fn update(&mut self, index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    Sgd,
    Adam,
}

impl OptimizerKind {
    pub fn build(self, learning_rate: f64) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Sgd => Box::new(Sgd::new(learning_rate)),
            OptimizerKind::Adam => Box::new(Adam::new(learning_rate)),
        }
    }
}
