//! The capability boundary between the cache gate and whatever learns the
//! mapping. The gate only ever builds, fits, saves, loads and queries a
//! model through this trait.

use std::path::Path;

use crate::dataset::TrainingDataset;
use crate::error::Result;
use crate::network::{LayerParams, Network, NetworkSpec};
use crate::train::{loop_fn::seeded_rng, train_loop, TrainConfig, TrainingRun};

pub trait Model: Sized {
    /// Fresh, untrained model with the given topology.
    fn build(spec: &NetworkSpec, seed: Option<u64>) -> Result<Self>;

    fn fit(&mut self, dataset: &TrainingDataset, config: &TrainConfig) -> Result<TrainingRun>;

    fn save(&self, path: &Path) -> Result<()>;

    fn load(path: &Path) -> Result<Self>;

    fn predict(&self, input: &[f64]) -> Result<Vec<f64>>;

    /// Per-layer parameters, input layer first.
    fn weights(&self) -> Vec<LayerParams>;
}

impl Model for Network {
    fn build(spec: &NetworkSpec, seed: Option<u64>) -> Result<Self> {
        Network::new(spec, &mut seeded_rng(seed))
    }

    fn fit(&mut self, dataset: &TrainingDataset, config: &TrainConfig) -> Result<TrainingRun> {
        // Offset so shuffling does not replay the init stream.
        let mut rng = seeded_rng(config.seed.map(|s| s.wrapping_add(1)));
        train_loop(self, &dataset.inputs(), &dataset.targets(), config, &mut rng)
    }

    fn save(&self, path: &Path) -> Result<()> {
        self.save_json(path)
    }

    fn load(path: &Path) -> Result<Self> {
        Network::load_json(path)
    }

    fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        Network::predict(self, input)
    }

    fn weights(&self) -> Vec<LayerParams> {
        self.params()
    }
}
