use std::path::{Path, PathBuf};

pub const ARTIFACT_FILE: &str = "model.json";
pub const FINGERPRINT_FILE: &str = "data_hash.txt";
pub const LOSS_CURVE_FILE: &str = "loss_curve.png";

/// File layout under a single output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    pub dir: PathBuf,
    pub artifact: PathBuf,
    pub fingerprint: PathBuf,
    pub loss_curve: PathBuf,
}

impl CachePaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        CachePaths {
            artifact: dir.join(ARTIFACT_FILE),
            fingerprint: dir.join(FINGERPRINT_FILE),
            loss_curve: dir.join(LOSS_CURVE_FILE),
            dir,
        }
    }
}

/// Sibling path used while a file is being written.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
