use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::network::params::LayerParams;
use crate::network::spec::NetworkSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a network from a validated spec, drawing initial weights from `rng`.
    pub fn new<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Result<Network> {
        spec.validate()?;
        let layers = spec.layers.iter()
            .map(|l| Layer::new(l.size, l.input_size, l.activation, rng))
            .collect();
        Ok(Network { layers })
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: Vec<f64>) -> Vec<f64> {
        let mut current = input;
        for layer in &mut self.layers {
            current = layer.feed_from(current);
        }
        current
    }

    /// Inference-only forward pass.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(Error::ShapeMismatch { expected: self.input_size(), actual: input.len() });
        }
        Ok(self.layers.iter().fold(input.to_vec(), |current, layer| layer.apply(current)))
    }

    pub fn params(&self) -> Vec<LayerParams> {
        self.layers.iter().map(LayerParams::from).collect()
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| Error::io(path, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &Path) -> Result<Network> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let network: Network = serde_json::from_reader(BufReader::new(file))?;
        network.check_shapes()?;
        Ok(network)
    }

    /// Every layer's matrices must chain from the first layer's input width.
    fn check_shapes(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::Serialization("network has no layers".into()));
        }
        let mut expected_inputs = self.input_size();
        for (i, layer) in self.layers.iter().enumerate() {
            let w = &layer.weights;
            let consistent = w.rows == expected_inputs
                && w.cols == layer.size
                && w.data.len() == w.rows
                && w.data.iter().all(|row| row.len() == w.cols)
                && layer.biases.rows == 1
                && layer.biases.cols == layer.size
                && layer.biases.data.len() == 1
                && layer.biases.data[0].len() == layer.size;
            if !consistent {
                return Err(Error::Serialization(format!("layer {i} has inconsistent shapes")));
            }
            expected_inputs = layer.size;
        }
        Ok(())
    }
}
