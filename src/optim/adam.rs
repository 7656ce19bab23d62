use crate::{math::matrix::Matrix, layers::dense::Layer};
use super::optimizer::Optimizer;

/// First and second moment estimates for one parameter matrix.
#[derive(Debug, Clone)]
struct Moments {
    m: Matrix,
    v: Matrix,
}

impl Moments {
    fn zeros_like(p: &Matrix) -> Moments {
        Moments { m: Matrix::zeros(p.rows, p.cols), v: Matrix::zeros(p.rows, p.cols) }
    }
}

/// Adam with bias-corrected step size.
///
/// Moment buffers are allocated lazily the first time a layer index is
/// updated, so one `Adam` can drive a network of any depth.
#[derive(Debug, Clone)]
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    t: i32,
    state: Vec<Option<(Moments, Moments)>>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Adam {
        Adam {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            t: 0,
            state: Vec::new(),
        }
    }

    fn step_size(&self) -> f64 {
        let t = self.t.max(1);
        self.learning_rate * (1.0 - self.beta2.powi(t)).sqrt() / (1.0 - self.beta1.powi(t))
    }

    fn apply(&self, param: &Matrix, grad: &Matrix, moments: &mut Moments, step: f64) -> Matrix {
        let (b1, b2, eps) = (self.beta1, self.beta2, self.epsilon);
        moments.m = moments.m.zip_map(grad, |m, g| b1 * m + (1.0 - b1) * g);
        moments.v = moments.v.zip_map(grad, |v, g| b2 * v + (1.0 - b2) * g * g);
        let direction = moments.m.zip_map(&moments.v, |m, v| m / (v.sqrt() + eps));
        param.zip_map(&direction, |p, d| p - step * d)
    }
}

impl Optimizer for Adam {
    fn begin_step(&mut self) {
        self.t += 1;
    }

    fn update(&mut self, index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix) {
        if self.state.len() <= index {
            self.state.resize(index + 1, None);
        }
        let (mut w_moments, mut b_moments) = self.state[index].take().unwrap_or_else(|| {
            (Moments::zeros_like(&layer.weights), Moments::zeros_like(&layer.biases))
        });

        let step = self.step_size();
        layer.weights = self.apply(&layer.weights, &weights_grad, &mut w_moments, step);
        layer.biases = self.apply(&layer.biases, &biases_grad, &mut b_moments, step);

        self.state[index] = Some((w_moments, b_moments));
    }
}
