use std::fmt;

use serde::{Serialize, Deserialize};

use crate::layers::dense::Layer;

/// Learned parameters of one dense layer, detached from the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    /// Shape (input_size, size).
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl From<&Layer> for LayerParams {
    fn from(layer: &Layer) -> Self {
        LayerParams {
            weights: layer.weights.data.clone(),
            biases: layer.biases.data.first().cloned().unwrap_or_default(),
        }
    }
}

impl fmt::Display for LayerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weights [")?;
        for (i, row) in self.weights.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}]", join(row))?;
        }
        write!(f, "], biases [{}]", join(&self.biases))
    }
}

fn join(values: &[f64]) -> String {
    values.iter().map(|v| format!("{v:.6}")).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::LayerParams;

    #[test]
    fn display_lists_weights_then_biases() {
        let params = LayerParams { weights: vec![vec![1.8]], biases: vec![32.0] };
        assert_eq!(params.to_string(), "weights [[1.800000]], biases [32.000000]");
    }
}
