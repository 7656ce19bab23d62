use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;

use ferrite_thermo::{
    config::DEFAULT_OUTPUT_DIR, run, Decision, OptimizerKind, RetrainReason, RunConfig, RunReport,
    TrainConfig,
};

#[derive(Parser)]
#[command(
    name = "ferrite-thermo",
    version,
    about = "Learn Celsius to Fahrenheit with a tiny network, reusing the trained model while the data is unchanged"
)]
struct Cli {
    /// Temperature in degrees Celsius to convert
    #[arg(allow_negative_numbers = true)]
    celsius: f64,
    /// Directory for the model, its data fingerprint and the loss curve
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Two-column CSV (celsius,fahrenheit) to train on instead of the built-in table
    #[arg(long, value_name = "CSV")]
    dataset: Option<PathBuf>,
    /// Training epochs
    #[arg(long)]
    epochs: Option<usize>,
    /// Optimizer learning rate
    #[arg(long)]
    learning_rate: Option<f64>,
    /// Samples per mini-batch
    #[arg(long)]
    batch_size: Option<usize>,
    /// Update rule
    #[arg(long, value_enum)]
    optimizer: Option<OptimizerArg>,
    /// Seed for weight init and shuffling
    #[arg(long)]
    seed: Option<u64>,
    /// Skip writing the loss curve
    #[arg(long)]
    no_plot: bool,
    /// Discard any cached model and train from scratch
    #[arg(long)]
    retrain: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OptimizerArg {
    Adam,
    Sgd,
}

impl From<OptimizerArg> for OptimizerKind {
    fn from(arg: OptimizerArg) -> Self {
        match arg {
            OptimizerArg::Adam => OptimizerKind::Adam,
            OptimizerArg::Sgd => OptimizerKind::Sgd,
        }
    }
}

impl Cli {
    fn into_config(self) -> (RunConfig, f64) {
        let defaults = TrainConfig::default();
        let train = TrainConfig {
            epochs: self.epochs.unwrap_or(defaults.epochs),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            learning_rate: self.learning_rate.unwrap_or(defaults.learning_rate),
            optimizer: self.optimizer.map(Into::into).unwrap_or(defaults.optimizer),
            seed: self.seed,
        };
        let config = RunConfig {
            output_dir: self.output_dir,
            dataset: self.dataset,
            train,
            plot: !self.no_plot,
            force_retrain: self.retrain,
            ..RunConfig::default()
        };
        (config, self.celsius)
    }
}

fn main() {
    let (config, celsius) = Cli::parse().into_config();

    match run(&config, celsius) {
        Ok(report) => print_report(&report, config.plot),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn print_report(report: &RunReport, plot_enabled: bool) {
    match report.decision {
        Decision::Reuse => println!("Model and data unchanged. Loaded cached model."),
        Decision::Retrain(RetrainReason::Missing) => {
            println!("No cached model or data fingerprint found. Training from scratch.")
        }
        Decision::Retrain(RetrainReason::DataChanged) => {
            println!("Training data changed since the cached model was built. Retraining.")
        }
        Decision::Retrain(RetrainReason::UnreadableFingerprint) => {
            println!("Stored data fingerprint is unreadable. Retraining.")
        }
        Decision::Retrain(RetrainReason::UnreadableArtifact) => {
            println!("Cached model could not be loaded. Retraining.")
        }
    }

    if let Some(run) = &report.training {
        println!(
            "Trained {} epochs in {:.2}s, final loss = {:.6}. Model saved with new fingerprint.",
            run.epochs(),
            run.elapsed.as_secs_f64(),
            run.final_loss().unwrap_or(f64::NAN),
        );
    }

    match (&report.loss_curve, &report.training) {
        (Some(path), _) => println!("Loss curve written to {}", path.display()),
        (None, Some(_)) if !plot_enabled => println!("Loss curve skipped (--no-plot)."),
        _ => println!("No loss curve: the model was not trained on this run."),
    }

    println!("{}°C is {:.2} °F", report.celsius, report.fahrenheit);

    println!("Layer parameters:");
    for (i, layer) in report.weights.iter().enumerate() {
        println!("  layer {}: {}", i + 1, layer);
    }
}
