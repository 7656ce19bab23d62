//! Crate-wide error type.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// A command-line value or configuration field is out of range.
    InvalidArgument(String),
    /// A dataset must contain at least one sample.
    EmptyDataset,
    /// A dataset file could not be parsed.
    Dataset(String),
    /// Reading or writing `path` failed.
    Io { path: PathBuf, source: io::Error },
    /// The model artifact could not be encoded or decoded.
    Serialization(String),
    /// Prediction input does not match the first layer's input size.
    ShapeMismatch { expected: usize, actual: usize },
    /// The loss curve could not be rendered or written.
    Plot(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::EmptyDataset => write!(f, "dataset contains no samples"),
            Error::Dataset(msg) => write!(f, "dataset error: {msg}"),
            Error::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Error::Serialization(msg) => write!(f, "model serialization failed: {msg}"),
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "input has {actual} values, model expects {expected}")
            }
            Error::Plot(msg) => write!(f, "loss curve: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
