use std::fmt;
use std::str::FromStr;

use crate::dataset::TrainingDataset;

/// Number of digest bytes kept (128 bits).
pub const FINGERPRINT_LEN: usize = 16;

/// 128-bit content digest of a dataset's canonical bytes.
///
/// The first 16 bytes of the BLAKE3 hash, rendered as 32 lowercase hex
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    pub fn of(dataset: &TrainingDataset) -> Self {
        Self::of_bytes(&dataset.canonical_bytes())
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        let hash = blake3::hash(bytes);
        let mut digest = [0u8; FINGERPRINT_LEN];
        digest.copy_from_slice(&hash.as_bytes()[..FINGERPRINT_LEN]);
        Fingerprint(digest)
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFingerprintError;

impl fmt::Display for ParseFingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} hex characters", FINGERPRINT_LEN * 2)
    }
}

impl std::error::Error for ParseFingerprintError {}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    /// Accepts exactly 32 hex digits (either case) after trimming whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != FINGERPRINT_LEN * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseFingerprintError);
        }
        let mut digest = [0u8; FINGERPRINT_LEN];
        for (i, byte) in digest.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| ParseFingerprintError)?;
        }
        Ok(Fingerprint(digest))
    }
}
