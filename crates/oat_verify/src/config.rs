//! Verifier configuration.

use serde::{Deserialize, Serialize};

/// Verifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Log every replayed event at debug level
    pub log_events: bool,
    /// Refuse trace files larger than this many bytes (None = unlimited)
    pub max_trace_bytes: Option<u64>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            log_events: false,
            max_trace_bytes: None,
        }
    }
}

impl VerifyConfig {
    /// Log each replayed event at `debug` level
    #[must_use]
    pub fn with_log_events(mut self, log_events: bool) -> Self {
        self.log_events = log_events;
        self
    }

    /// Refuse trace files larger than `limit` bytes
    #[must_use]
    pub fn with_max_trace_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_trace_bytes = limit;
        self
    }
}
