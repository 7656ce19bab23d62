//! Training samples and their canonical byte encoding.
//!
//! A dataset is a non-empty, ordered list of `(input, expected)` pairs. The
//! byte encoding (all inputs, then all expected values, each as little-endian
//! f64) is what the cache fingerprint is computed over, so two datasets share
//! a fingerprint only when they are bit-for-bit identical.

use std::path::Path;

use crate::error::{Error, Result};

/// Celsius readings and their Fahrenheit equivalents.
const CELSIUS_FAHRENHEIT: [(f64, f64); 7] = [
    (-40.0, -40.0),
    (-10.0, 14.0),
    (0.0, 32.0),
    (8.0, 46.0),
    (15.0, 59.0),
    (22.0, 72.0),
    (38.0, 100.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDataset {
    samples: Vec<(f64, f64)>,
}

impl TrainingDataset {
    pub fn from_pairs(samples: Vec<(f64, f64)>) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if let Some(i) = samples.iter().position(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(Error::Dataset(format!("sample {} is not a finite pair", i + 1)));
        }
        Ok(TrainingDataset { samples })
    }

    /// The built-in conversion table.
    pub fn celsius_to_fahrenheit() -> Self {
        TrainingDataset { samples: CELSIUS_FAHRENHEIT.to_vec() }
    }

    /// Parses two-column CSV text.
    ///
    /// The first row is treated as a header when none of its cells is a
    /// number. Blank lines are skipped.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        let mut lines = text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .peekable();

        if let Some((_, first)) = lines.peek() {
            if is_header(first) {
                lines.next();
            }
        }

        let mut samples = Vec::new();
        for (idx, line) in lines {
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() != 2 {
                return Err(Error::Dataset(format!(
                    "line {}: expected 2 columns, got {}",
                    idx + 1,
                    cells.len()
                )));
            }
            let parse = |cell: &str| {
                cell.parse::<f64>().map_err(|_| {
                    Error::Dataset(format!("line {}: '{}' is not a number", idx + 1, cell))
                })
            };
            samples.push((parse(cells[0])?, parse(cells[1])?));
        }

        Self::from_pairs(samples)
    }

    pub fn from_csv_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_csv_str(&text)
    }

    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Inputs shaped for the network, one single-value row per sample.
    pub fn inputs(&self) -> Vec<Vec<f64>> {
        self.samples.iter().map(|&(x, _)| vec![x]).collect()
    }

    pub fn targets(&self) -> Vec<Vec<f64>> {
        self.samples.iter().map(|&(_, y)| vec![y]).collect()
    }

    /// All inputs followed by all expected values, little-endian f64.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 16);
        for (x, _) in &self.samples {
            bytes.extend_from_slice(&x.to_le_bytes());
        }
        for (_, y) in &self.samples {
            bytes.extend_from_slice(&y.to_le_bytes());
        }
        bytes
    }
}

impl Default for TrainingDataset {
    fn default() -> Self {
        TrainingDataset::celsius_to_fahrenheit()
    }
}

fn is_header(line: &str) -> bool {
    line.split(',').all(|cell| cell.trim().parse::<f64>().is_err())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_seven_samples() {
        let ds = TrainingDataset::default();
        assert_eq!(ds.len(), 7);
        assert_eq!(ds.samples()[2], (0.0, 32.0));
        assert_eq!(ds.inputs()[6], vec![38.0]);
        assert_eq!(ds.targets()[6], vec![100.0]);
    }

    #[test]
    fn canonical_bytes_are_column_major() {
        let ds = TrainingDataset::from_pairs(vec![(1.0, 2.0), (3.0, 4.0)]).unwrap();
        let bytes = ds.canonical_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[8..16], &3.0f64.to_le_bytes());
        assert_eq!(&bytes[16..24], &2.0f64.to_le_bytes());
        assert_eq!(&bytes[24..32], &4.0f64.to_le_bytes());
    }

    #[test]
    fn csv_with_header() {
        let ds = TrainingDataset::from_csv_str("celsius,fahrenheit\n0,32\n\n100, 212\n").unwrap();
        assert_eq!(ds.samples(), &[(0.0, 32.0), (100.0, 212.0)]);
    }

    #[test]
    fn csv_without_header() {
        let ds = TrainingDataset::from_csv_str("-40,-40\n37.5,99.5").unwrap();
        assert_eq!(ds.samples(), &[(-40.0, -40.0), (37.5, 99.5)]);
    }

    #[test]
    fn csv_errors_name_the_line() {
        let err = TrainingDataset::from_csv_str("c,f\n1,2\n3,x\n").unwrap_err();
        assert_eq!(err.to_string(), "dataset error: line 3: 'x' is not a number");

        let err = TrainingDataset::from_csv_str("1,2,3\n").unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[test]
    fn malformed_first_row_is_an_error_not_a_header() {
        let err = TrainingDataset::from_csv_str("1,abc\n2,35.6\n").unwrap_err();
        assert_eq!(err.to_string(), "dataset error: line 1: 'abc' is not a number");
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert!(matches!(TrainingDataset::from_pairs(vec![]), Err(Error::EmptyDataset)));
        assert!(matches!(TrainingDataset::from_csv_str("c,f\n"), Err(Error::EmptyDataset)));
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let err = TrainingDataset::from_pairs(vec![(1.0, f64::NAN)]).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }
}
