//! The end-to-end pipeline: fingerprint the data, consult the cache, train
//! and persist when needed, then predict.

use std::path::PathBuf;

use crate::cache::{CacheGate, CachePaths, Decision};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::model::Model;
use crate::network::{LayerParams, Network};
use crate::plot::write_loss_curve;
use crate::train::TrainingRun;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub decision: Decision,
    /// Present only when the model was trained on this run.
    pub training: Option<TrainingRun>,
    /// Where the loss curve was written, if it was.
    pub loss_curve: Option<PathBuf>,
    pub celsius: f64,
    pub fahrenheit: f64,
    pub weights: Vec<LayerParams>,
}

/// Runs the pipeline with the bundled network.
pub fn run(config: &RunConfig, celsius: f64) -> Result<RunReport> {
    run_with::<Network>(config, celsius)
}

/// Runs the pipeline with any model implementation.
pub fn run_with<M: Model>(config: &RunConfig, celsius: f64) -> Result<RunReport> {
    if !celsius.is_finite() {
        return Err(Error::InvalidArgument(format!("temperature must be a finite number, got {celsius}")));
    }
    config.validate()?;
    let dataset = config.load_dataset()?;

    let gate = CacheGate::new(CachePaths::new(&config.output_dir));
    if config.force_retrain {
        gate.invalidate()?;
    }

    let outcome = gate.check::<M>(&dataset);
    let (model, training) = match outcome.artifact {
        Some(model) => (model, None),
        None => {
            let mut model = M::build(&config.network, config.train.seed)?;
            let run = model.fit(&dataset, &config.train)?;
            gate.persist(&model, &outcome.fingerprint)?;
            (model, Some(run))
        }
    };

    let loss_curve = match &training {
        Some(run) if config.plot => {
            let path = gate.paths().loss_curve.clone();
            write_loss_curve(&run.losses, &path)?;
            Some(path)
        }
        _ => None,
    };

    let output = model.predict(&[celsius])?;
    let fahrenheit = output.first().copied().ok_or(Error::ShapeMismatch { expected: 1, actual: 0 })?;

    Ok(RunReport {
        decision: outcome.decision,
        training,
        loss_curve,
        celsius,
        fahrenheit,
        weights: model.weights(),
    })
}
