use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::optim::optimizer::OptimizerKind;

/// Hyperparameters for a `train_loop` run.
///
/// - `epochs`        — total number of full passes over the training data
/// - `batch_size`    — samples per mini-batch; use `1` for online updates
/// - `learning_rate` — base step size handed to the optimizer
/// - `optimizer`     — update rule
/// - `seed`          — fixes weight init and shuffling; `None` draws from entropy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub optimizer: OptimizerKind,
    pub seed: Option<u64>,
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidArgument("epochs must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidArgument("batch size must be at least 1".into()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 1000,
            batch_size: 32,
            learning_rate: 0.1,
            optimizer: OptimizerKind::Adam,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_values() {
        let zero_epochs = TrainConfig { epochs: 0, ..TrainConfig::default() };
        let zero_batch = TrainConfig { batch_size: 0, ..TrainConfig::default() };
        let nan_lr = TrainConfig { learning_rate: f64::NAN, ..TrainConfig::default() };
        let negative_lr = TrainConfig { learning_rate: -0.1, ..TrainConfig::default() };
        for config in [zero_epochs, zero_batch, nan_lr, negative_lr] {
            assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
        }
    }
}
