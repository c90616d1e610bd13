//! SHA-256 digests over trace payloads.
//!
//! The published value for a trace is the lowercase hex encoding of the
//! SHA-256 of every payload byte in record order.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

/// A SHA-256 digest (256 bits / 32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Digest([u8; 32]);

impl Digest {
    /// The number of bytes in a digest
    pub const LEN: usize = 32;

    /// Compute the SHA-256 of `data` in one shot
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Lowercase hex, always 64 characters
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check whether `s` is in canonical published form (64 lowercase hex chars)
    #[must_use]
    pub fn is_canonical_hex(s: &str) -> bool {
        s.len() == Self::LEN * 2 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Streaming SHA-256 accumulator for one trace.
///
/// Created empty, absorbs one payload per record, and is consumed by
/// [`DigestState::finalize`], so a state can never be reused for a second
/// trace.
#[derive(Debug, Clone, Default)]
pub struct DigestState {
    hasher: Sha256,
    records: u64,
    bytes: u64,
}

impl DigestState {
    /// Create an empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one record payload
    pub fn absorb(&mut self, payload: &[u8]) {
        self.hasher.update(payload);
        self.records += 1;
        self.bytes += payload.len() as u64;
    }

    /// Number of payloads absorbed so far
    #[must_use]
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Number of payload bytes absorbed so far
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Finish the digest
    #[must_use]
    pub fn finalize(self) -> Digest {
        Digest(self.hasher.finalize().into())
    }
}
