pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod error;
pub mod dataset;
pub mod model;
pub mod cache;
pub mod plot;
pub mod config;
pub mod app;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, NetworkSpec, LayerSpec, LayerParams};
pub use loss::mse::MseLoss;
pub use optim::{Optimizer, OptimizerKind, Sgd, Adam};
pub use train::{train_loop, TrainConfig, TrainingRun};
pub use error::{Error, Result};
pub use dataset::TrainingDataset;
pub use model::Model;
pub use cache::{CacheGate, CachePaths, Decision, Fingerprint, GateOutcome, RetrainReason};
pub use config::RunConfig;
pub use app::{run, run_with, RunReport};
