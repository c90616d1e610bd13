//! Replay verifier: decode, digest, compare.

use crate::config::VerifyConfig;
use crate::observer::{EventObserver, NoopObserver, TracingObserver};
use crate::report::VerificationResult;
use oat_core::{CoreError, CoreResult, Digest, DigestState, MalformedTrace};
use oat_log::TraceDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Verifies traces against published digests
#[derive(Debug, Clone, Default)]
pub struct TraceVerifier {
    config: VerifyConfig,
}

impl TraceVerifier {
    /// Create a new verifier
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    #[must_use]
    pub fn with_config(mut self, config: VerifyConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Verify an in-memory trace
    ///
    /// # Errors
    ///
    /// Returns the first framing error; no partial result is produced
    pub fn verify(&self, data: &[u8], claimed: &str) -> Result<VerificationResult, MalformedTrace> {
        self.verify_with_observer(data, claimed, &mut NoopObserver)
    }

    /// Verify an in-memory trace, reporting each event to `observer`
    ///
    /// # Errors
    ///
    /// Returns the first framing error; no partial result is produced
    pub fn verify_with_observer<O>(
        &self,
        data: &[u8],
        claimed: &str,
        observer: &mut O,
    ) -> Result<VerificationResult, MalformedTrace>
    where
        O: EventObserver + ?Sized,
    {
        let mut state = DigestState::new();
        for event in TraceDecoder::new(data) {
            let event = event.inspect_err(|err| {
                tracing::warn!(record = err.record(), offset = err.offset(), "replay aborted: {err}");
            })?;
            state.absorb(event.payload());
            if self.config.log_events {
                TracingObserver.on_event(&event);
            }
            observer.on_event(&event);
        }

        let events = state.records();
        let calculated = state.finalize().to_hex();
        let result = VerificationResult::new(calculated, claimed.to_owned(), events, data.len() as u64);

        if result.matched {
            tracing::info!(events, digest = %result.calculated, "trace authenticated");
        } else {
            tracing::warn!(
                events,
                calculated = %result.calculated,
                claimed = %result.claimed,
                "digest mismatch"
            );
        }
        Ok(result)
    }

    /// Read a trace file and verify it
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, exceeds the configured
    /// size limit, or does not decode
    pub fn verify_file<O>(
        &self,
        path: &Path,
        claimed: &str,
        observer: &mut O,
    ) -> CoreResult<VerificationResult>
    where
        O: EventObserver + ?Sized,
    {
        let data = self.read_trace(path)?;
        Ok(self.verify_with_observer(&data, claimed, observer)?)
    }

    /// Read a trace file, honoring `max_trace_bytes`
    ///
    /// The limit applies to the bytes actually read, so pipes and device
    /// files whose metadata reports no length are bounded too.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or exceeds the size limit
    pub fn read_trace(&self, path: &Path) -> CoreResult<Vec<u8>> {
        let io_err = |source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let too_large = |len, limit| CoreError::TraceTooLarge {
            path: path.to_path_buf(),
            len,
            limit,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let data = match self.config.max_trace_bytes {
            Some(limit) => {
                let len = file.metadata().map_err(io_err)?.len();
                if len > limit {
                    return Err(too_large(len, limit));
                }
                let data = read_bounded(file, limit).map_err(io_err)?;
                if data.len() as u64 > limit {
                    return Err(too_large(data.len() as u64, limit));
                }
                data
            }
            None => {
                let mut data = Vec::new();
                file.read_to_end(&mut data).map_err(io_err)?;
                data
            }
        };
        tracing::debug!(path = %path.display(), bytes = data.len(), "loaded trace");
        Ok(data)
    }
}

/// Read at most `limit + 1` bytes, enough to tell whether `limit` is exceeded
fn read_bounded<R: Read>(reader: R, limit: u64) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut data)?;
    Ok(data)
}

/// Verify a trace file with the default configuration
///
/// # Errors
///
/// Returns error if the file cannot be read or does not decode
pub fn verify_file(path: &Path, claimed: &str) -> CoreResult<VerificationResult> {
    TraceVerifier::new().verify_file(path, claimed, &mut NoopObserver)
}

/// The digest a distributor publishes for `data`
///
/// # Errors
///
/// Returns the first framing error
pub fn compute_digest(data: &[u8]) -> Result<Digest, MalformedTrace> {
    let mut state = DigestState::new();
    for event in TraceDecoder::new(data) {
        state.absorb(event?.payload());
    }
    Ok(state.finalize())
}
