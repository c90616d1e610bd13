//! Verification outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one verification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Lowercase hex SHA-256 over all payloads
    pub calculated: String,
    /// Digest string supplied by the caller, verbatim
    pub claimed: String,
    /// Exact, case-sensitive equality of the two
    pub matched: bool,
    /// Records replayed
    pub events: u64,
    /// Trace length in bytes
    pub trace_bytes: u64,
}

impl VerificationResult {
    /// Build a result, comparing the strings exactly
    #[must_use]
    pub fn new(calculated: String, claimed: String, events: u64, trace_bytes: u64) -> Self {
        let matched = calculated == claimed;
        Self {
            calculated,
            claimed,
            matched,
            events,
            trace_bytes,
        }
    }

    /// Whether the calculated digest equals the claimed one
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.matched
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calculated Hash: {}", self.calculated)?;
        writeln!(f, "Claimed Hash:    {}", self.claimed)?;
        if self.matched {
            write!(f, "SUCCESS: trace is authenticated ({} events)", self.events)
        } else {
            write!(f, "FAILURE: hash mismatch, trace has been altered")
        }
    }
}
