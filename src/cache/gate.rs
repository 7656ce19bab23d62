use std::fs;
use std::io;
use std::path::Path;

use crate::cache::fingerprint::Fingerprint;
use crate::cache::paths::{staging_path, CachePaths};
use crate::dataset::TrainingDataset;
use crate::error::{Error, Result};
use crate::model::Model;

/// Why a cached artifact could not be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrainReason {
    /// The artifact, the fingerprint, or both are absent.
    Missing,
    /// The stored fingerprint belongs to different training data.
    DataChanged,
    /// The fingerprint file exists but does not hold a fingerprint.
    UnreadableFingerprint,
    /// The fingerprint matches but the artifact failed to load.
    UnreadableArtifact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Reuse,
    Retrain(RetrainReason),
}

/// Result of a gate check. `artifact` is `Some` exactly when the decision is
/// `Reuse`.
#[derive(Debug)]
pub struct GateOutcome<M> {
    pub decision: Decision,
    pub artifact: Option<M>,
    /// Fingerprint of the dataset that was checked; hand it to `persist`
    /// after retraining.
    pub fingerprint: Fingerprint,
}

impl<M> GateOutcome<M> {
    fn retrain(reason: RetrainReason, fingerprint: Fingerprint) -> Self {
        GateOutcome { decision: Decision::Retrain(reason), artifact: None, fingerprint }
    }
}

/// Decides whether a persisted model may be reused for a dataset, and
/// persists a freshly trained model together with its fingerprint.
///
/// The artifact and the fingerprint are only valid as a pair. The fingerprint
/// file is always written last, so an interrupted `persist` leaves the pair
/// looking absent and the next check retrains.
#[derive(Debug, Clone)]
pub struct CacheGate {
    paths: CachePaths,
}

impl CacheGate {
    pub fn new(paths: CachePaths) -> Self {
        CacheGate { paths }
    }

    pub fn paths(&self) -> &CachePaths {
        &self.paths
    }

    /// Reads the cache and decides. Never writes, never fails: anything
    /// unreadable downgrades to a retrain.
    pub fn check<M: Model>(&self, dataset: &TrainingDataset) -> GateOutcome<M> {
        let current = Fingerprint::of(dataset);

        if !self.paths.artifact.exists() || !self.paths.fingerprint.exists() {
            return GateOutcome::retrain(RetrainReason::Missing, current);
        }

        let stored = match fs::read_to_string(&self.paths.fingerprint) {
            Ok(text) => text.parse::<Fingerprint>(),
            Err(_) => return GateOutcome::retrain(RetrainReason::UnreadableFingerprint, current),
        };
        match stored {
            Ok(stored) if stored == current => {}
            Ok(_) => return GateOutcome::retrain(RetrainReason::DataChanged, current),
            Err(_) => return GateOutcome::retrain(RetrainReason::UnreadableFingerprint, current),
        }

        match M::load(&self.paths.artifact) {
            Ok(model) => GateOutcome { decision: Decision::Reuse, artifact: Some(model), fingerprint: current },
            Err(_) => GateOutcome::retrain(RetrainReason::UnreadableArtifact, current),
        }
    }

    /// Writes `model` and `fingerprint` as a pair, creating the output
    /// directory if needed, and removes any loss curve left from an earlier
    /// model. On failure no staging files are left behind and
    /// no fingerprint file remains.
    pub fn persist<M: Model>(&self, model: &M, fingerprint: &Fingerprint) -> Result<()> {
        fs::create_dir_all(&self.paths.dir).map_err(|e| Error::io(&self.paths.dir, e))?;

        let artifact_tmp = staging_path(&self.paths.artifact);
        let fingerprint_tmp = staging_path(&self.paths.fingerprint);

        let result = self.commit(model, fingerprint, &artifact_tmp, &fingerprint_tmp);
        if result.is_err() {
            let _ = fs::remove_file(&artifact_tmp);
            let _ = fs::remove_file(&fingerprint_tmp);
        }
        result
    }

    fn commit<M: Model>(
        &self,
        model: &M,
        fingerprint: &Fingerprint,
        artifact_tmp: &Path,
        fingerprint_tmp: &Path,
    ) -> Result<()> {
        model.save(artifact_tmp)?;
        fs::write(fingerprint_tmp, fingerprint.to_hex()).map_err(|e| Error::io(fingerprint_tmp, e))?;

        // Drop the old marker first: from here until the final rename the
        // pair reads as absent. The old loss curve describes the old model.
        remove_if_present(&self.paths.fingerprint)?;
        remove_if_present(&self.paths.loss_curve)?;
        fs::rename(artifact_tmp, &self.paths.artifact).map_err(|e| Error::io(&self.paths.artifact, e))?;
        fs::rename(fingerprint_tmp, &self.paths.fingerprint)
            .map_err(|e| Error::io(&self.paths.fingerprint, e))
    }

    /// Removes the cached pair so the next check retrains.
    pub fn invalidate(&self) -> Result<()> {
        remove_if_present(&self.paths.fingerprint)?;
        remove_if_present(&self.paths.artifact)
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Network, NetworkSpec};
    use std::time::SystemTime;

    fn gate_in(dir: &Path) -> CacheGate {
        CacheGate::new(CachePaths::new(dir.join("outputs")))
    }

    fn model() -> Network {
        <Network as Model>::build(&NetworkSpec::default(), Some(8)).unwrap()
    }

    fn persist_default(gate: &CacheGate) -> Network {
        let outcome = gate.check::<Network>(&TrainingDataset::default());
        let net = model();
        gate.persist(&net, &outcome.fingerprint).unwrap();
        net
    }

    fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>, SystemTime)> {
        let mut entries: Vec<_> = fs::read_dir(dir).unwrap()
            .map(|e| {
                let e = e.unwrap();
                let meta = e.metadata().unwrap();
                (
                    e.file_name().to_string_lossy().into_owned(),
                    fs::read(e.path()).unwrap(),
                    meta.modified().unwrap(),
                )
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    #[test]
    fn empty_cache_retrains() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = gate_in(tmp.path()).check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::Missing));
        assert!(outcome.artifact.is_none());
    }

    #[test]
    fn check_does_not_create_the_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        gate.check::<Network>(&TrainingDataset::default());
        assert!(!gate.paths().dir.exists());
    }

    #[test]
    fn persisted_pair_is_reused() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        let saved = persist_default(&gate);

        let hex = fs::read_to_string(&gate.paths().fingerprint).unwrap();
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));

        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Reuse);
        assert_eq!(outcome.artifact.unwrap().weights(), saved.weights());
    }

    #[test]
    fn reuse_performs_no_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);

        let before = snapshot(&gate.paths().dir);
        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Reuse);
        assert_eq!(snapshot(&gate.paths().dir), before);
    }

    #[test]
    fn changed_data_retrains_even_with_artifact_present() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);

        let mut pairs = TrainingDataset::default().samples().to_vec();
        pairs[0].0 = -41.0;
        let changed = TrainingDataset::from_pairs(pairs).unwrap();

        assert!(gate.paths().artifact.exists());
        let outcome = gate.check::<Network>(&changed);
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::DataChanged));
        assert!(outcome.artifact.is_none());
    }

    #[test]
    fn missing_half_of_the_pair_retrains() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());

        persist_default(&gate);
        fs::remove_file(&gate.paths().fingerprint).unwrap();
        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::Missing));

        persist_default(&gate);
        fs::remove_file(&gate.paths().artifact).unwrap();
        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::Missing));
    }

    #[test]
    fn corrupt_fingerprint_retrains() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);

        fs::write(&gate.paths().fingerprint, "not a digest").unwrap();
        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::UnreadableFingerprint));

        fs::write(&gate.paths().fingerprint, [0xff, 0xfe, 0x00]).unwrap();
        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::UnreadableFingerprint));
    }

    #[test]
    fn fingerprint_with_trailing_newline_still_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);

        let hex = fs::read_to_string(&gate.paths().fingerprint).unwrap();
        fs::write(&gate.paths().fingerprint, format!("{hex}\n")).unwrap();
        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Reuse);
    }

    #[test]
    fn corrupt_artifact_retrains() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);

        fs::write(&gate.paths().artifact, "{}").unwrap();
        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::UnreadableArtifact));
    }

    #[test]
    fn artifact_with_inconsistent_bias_shape_retrains() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);

        let text = fs::read_to_string(&gate.paths().artifact).unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&text).unwrap();
        json["layers"][0]["biases"]["cols"] = serde_json::json!(7);
        fs::write(&gate.paths().artifact, json.to_string()).unwrap();

        let outcome = gate.check::<Network>(&TrainingDataset::default());
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::UnreadableArtifact));
        assert!(outcome.artifact.is_none());
    }

    #[test]
    fn persist_clears_the_previous_loss_curve() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);
        fs::write(&gate.paths().loss_curve, "old curve").unwrap();

        persist_default(&gate);
        assert!(!gate.paths().loss_curve.exists());
        assert_eq!(gate.check::<Network>(&TrainingDataset::default()).decision, Decision::Reuse);
    }

    #[test]
    fn persist_overwrites_a_stale_pair() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);

        let mut pairs = TrainingDataset::default().samples().to_vec();
        pairs.push((100.0, 212.0));
        let extended = TrainingDataset::from_pairs(pairs).unwrap();

        let outcome = gate.check::<Network>(&extended);
        assert_eq!(outcome.decision, Decision::Retrain(RetrainReason::DataChanged));
        gate.persist(&model(), &outcome.fingerprint).unwrap();

        assert_eq!(gate.check::<Network>(&extended).decision, Decision::Reuse);
        assert_eq!(
            gate.check::<Network>(&TrainingDataset::default()).decision,
            Decision::Retrain(RetrainReason::DataChanged)
        );
    }

    #[test]
    fn failed_persist_leaves_no_valid_pair() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        persist_default(&gate);

        // A directory squatting on the artifact path makes the rename fail.
        fs::remove_file(&gate.paths().artifact).unwrap();
        fs::create_dir(&gate.paths().artifact).unwrap();
        fs::write(gate.paths().artifact.join("keep"), "x").unwrap();

        let fingerprint = Fingerprint::of(&TrainingDataset::default());
        let err = gate.persist(&model(), &fingerprint).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));

        assert!(!gate.paths().fingerprint.exists());
        assert!(!staging_path(&gate.paths().artifact).exists());
        assert!(!staging_path(&gate.paths().fingerprint).exists());
        assert_eq!(
            gate.check::<Network>(&TrainingDataset::default()).decision,
            Decision::Retrain(RetrainReason::Missing)
        );
    }

    #[test]
    fn persist_reports_unwritable_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("outputs");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let gate = CacheGate::new(CachePaths::new(&blocker));
        let err = gate.persist(&model(), &Fingerprint::of(&TrainingDataset::default())).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn invalidate_forces_retrain_and_tolerates_absence() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = gate_in(tmp.path());
        gate.invalidate().unwrap();

        persist_default(&gate);
        gate.invalidate().unwrap();
        assert_eq!(
            gate.check::<Network>(&TrainingDataset::default()).decision,
            Decision::Retrain(RetrainReason::Missing)
        );
    }
}
