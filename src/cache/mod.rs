pub mod fingerprint;
pub mod paths;
pub mod gate;

pub use fingerprint::Fingerprint;
pub use paths::CachePaths;
pub use gate::{CacheGate, Decision, GateOutcome, RetrainReason};
