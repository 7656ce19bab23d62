use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};

/// Describes one layer in a network specification.
///
/// - `size`       — number of neurons in this layer
/// - `input_size` — output size of the previous layer, or the raw input
///                  dimension for the first layer
/// - `activation` — activation function applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

impl LayerSpec {
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Self {
        LayerSpec { size, input_size, activation }
    }
}

/// Ordered list of layer descriptions (input → output).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Scalar in, scalar out, two hidden layers of three linear units.
    pub fn celsius_to_fahrenheit() -> NetworkSpec {
        use ActivationFunction::Identity;
        NetworkSpec {
            layers: vec![
                LayerSpec::new(3, 1, Identity),
                LayerSpec::new(3, 3, Identity),
                LayerSpec::new(1, 3, Identity),
            ],
        }
    }

    /// Checks that the spec is non-empty and that each layer's `input_size`
    /// equals the previous layer's `size`.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::InvalidArgument("network needs at least one layer".into()));
        }
        if let Some(zero) = self.layers.iter().position(|l| l.size == 0 || l.input_size == 0) {
            return Err(Error::InvalidArgument(format!("layer {zero} has a zero dimension")));
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].size != pair[1].input_size {
                return Err(Error::InvalidArgument(format!(
                    "layer {} expects {} inputs but layer {} produces {}",
                    i + 1, pair[1].input_size, i, pair[0].size
                )));
            }
        }
        Ok(())
    }
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec::celsius_to_fahrenheit()
    }
}
