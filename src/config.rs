//! Settings for one end-to-end run.
//!
//! Defaults reproduce the conversion example: the built-in table, a
//! 1 → 3 → 3 → 1 linear network, Adam at 0.1 for 1000 epochs, artifacts
//! under `outputs/`. The CLI overrides individual fields.

use std::path::PathBuf;

use crate::dataset::TrainingDataset;
use crate::error::Result;
use crate::network::NetworkSpec;
use crate::train::TrainConfig;

pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Directory holding the artifact, its fingerprint and the loss curve.
    pub output_dir: PathBuf,
    /// Two-column CSV to train on; the built-in table when `None`.
    pub dataset: Option<PathBuf>,
    pub network: NetworkSpec,
    pub train: TrainConfig,
    /// Write the loss curve after training.
    pub plot: bool,
    /// Drop any cached pair before checking.
    pub force_retrain: bool,
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.train.validate()
    }

    pub fn load_dataset(&self) -> Result<TrainingDataset> {
        match &self.dataset {
            Some(path) => TrainingDataset::from_csv_file(path),
            None => Ok(TrainingDataset::celsius_to_fahrenheit()),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dataset: None,
            network: NetworkSpec::default(),
            train: TrainConfig::default(),
            plot: true,
            force_retrain: false,
        }
    }
}
