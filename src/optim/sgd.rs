use crate::{math::matrix::Matrix, layers::dense::Layer};
use super::optimizer::Optimizer;

pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }
}

impl Optimizer for Sgd {
    fn update(&mut self, _index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix) {
        let lr = self.learning_rate;
        layer.weights = layer.weights.zip_map(&weights_grad, |w, g| w - lr * g);
        layer.biases = layer.biases.zip_map(&biases_grad, |b, g| b - lr * g);
    }
}
