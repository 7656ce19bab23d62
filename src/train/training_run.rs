use std::time::Duration;

/// Loss history of one completed training pass.
///
/// Only produced when the model was actually trained; a reused artifact has
/// no run attached.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRun {
    /// Mean training loss of each epoch, in order.
    pub losses: Vec<f64>,
    pub elapsed: Duration,
}

impl TrainingRun {
    pub fn epochs(&self) -> usize {
        self.losses.len()
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}
