use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::optimizer::Optimizer;
use crate::train::train_config::TrainConfig;
use crate::train::training_run::TrainingRun;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Seeded generator when `seed` is set, entropy-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Trains `network` for `config.epochs` epochs of shuffled mini-batch
/// updates against MSE and returns the per-epoch mean losses.
///
/// # Errors
/// `InvalidArgument` if the config is degenerate, the inputs are empty, the
/// input/label counts differ, or a sample does not match the network's width.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainingRun> {
    config.validate()?;
    if train_inputs.is_empty() {
        return Err(Error::EmptyDataset);
    }
    if train_inputs.len() != train_labels.len() {
        return Err(Error::InvalidArgument(format!(
            "{} inputs but {} labels",
            train_inputs.len(),
            train_labels.len()
        )));
    }
    let expected_width = network.input_size();
    if let Some(bad) = train_inputs.iter().find(|x| x.len() != expected_width) {
        return Err(Error::ShapeMismatch { expected: expected_width, actual: bad.len() });
    }

    let mut optimizer = config.optimizer.build(config.learning_rate);
    let started = Instant::now();
    let mut losses = Vec::with_capacity(config.epochs);

    for _ in 0..config.epochs {
        losses.push(run_one_epoch(
            network,
            train_inputs,
            train_labels,
            optimizer.as_mut(),
            config.batch_size,
            rng,
        ));
    }

    Ok(TrainingRun { losses, elapsed: started.elapsed() })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one full epoch of mini-batch updates over the training data.
/// Returns the mean loss over all samples.
fn run_one_epoch<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    optimizer: &mut dyn Optimizer,
    batch_size: usize,
    rng: &mut R,
) -> f64 {
    let n = inputs.len();
    let mut total_loss = 0.0;

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    for batch in indices.chunks(batch_size) {
        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();

        for &idx in batch {
            let input    = &inputs[idx];
            let expected = &labels[idx];

            let output = network.forward(input.clone());
            total_loss += MseLoss::loss(&output, expected);

            let mut delta = Matrix::row(MseLoss::derivative(&output, expected));

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::row(input.clone())
                } else {
                    network.layers[i - 1].neurons.clone()
                };

                let (w_grad, b_grad) = network.layers[i].compute_gradients(
                    delta.clone(),
                    &input_for_layer,
                );

                if i > 0 {
                    delta = b_grad.clone() * network.layers[i].weights.transpose();
                }

                acc_grads[i].0 = acc_grads[i].0.clone() + w_grad;
                acc_grads[i].1 = acc_grads[i].1.clone() + b_grad;
            }
        }

        let inv_batch = 1.0 / batch.len() as f64;
        optimizer.begin_step();
        for (i, (w_acc, b_acc)) in acc_grads.into_iter().enumerate() {
            let w_avg = w_acc.map(|x| x * inv_batch);
            let b_avg = b_acc.map(|x| x * inv_batch);
            optimizer.update(i, &mut network.layers[i], w_avg, b_avg);
        }
    }

    total_loss / n as f64
}
