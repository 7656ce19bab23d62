pub mod train_config;
pub mod training_run;
pub mod loop_fn;

pub use train_config::TrainConfig;
pub use training_run::TrainingRun;
pub use loop_fn::train_loop;
