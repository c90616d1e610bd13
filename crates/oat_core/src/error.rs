//! Core error types for OAT.

use crate::kind::EventKind;
use std::path::PathBuf;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// A trace that does not frame into whole records.
///
/// `record` is the zero-based index of the offending record and `offset`
/// the byte position of its tag. Both are diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTrace {
    /// Tag byte outside {1, 2, 3}
    #[error("unrecognized tag 0x{tag:02x} at offset {offset} (record {record})")]
    UnrecognizedTag {
        /// Offending tag byte
        tag: u8,
        /// Offset of the tag byte
        offset: usize,
        /// Record index
        record: usize,
    },

    /// Fewer bytes remain than the tag's payload requires
    #[error(
        "truncated {kind} payload at offset {offset} (record {record}): \
         need {needed} bytes, {available} available"
    )]
    TruncatedPayload {
        /// Kind announced by the tag
        kind: EventKind,
        /// Offset of the tag byte
        offset: usize,
        /// Record index
        record: usize,
        /// Payload width for `kind`
        needed: usize,
        /// Bytes left after the tag
        available: usize,
    },
}

impl MalformedTrace {
    /// Byte offset of the offending record's tag
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnrecognizedTag { offset, .. } | Self::TruncatedPayload { offset, .. } => *offset,
        }
    }

    /// Index of the offending record
    #[must_use]
    pub const fn record(&self) -> usize {
        match self {
            Self::UnrecognizedTag { record, .. } | Self::TruncatedPayload { record, .. } => *record,
        }
    }
}

/// Core error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The trace bytes do not decode
    #[error("malformed trace: {0}")]
    Malformed(#[from] MalformedTrace),

    /// The trace source could not be read
    #[error("failed to read trace {}: {source}", .path.display())]
    Io {
        /// Trace path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// The trace exceeds the configured size limit
    #[error("trace {} is {len} bytes, limit is {limit}", .path.display())]
    TraceTooLarge {
        /// Trace path
        path: PathBuf,
        /// Actual size
        len: u64,
        /// Configured limit
        limit: u64,
    },
}

impl CoreError {
    /// Whether the failure came from the trace contents rather than its source
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_tag_display() {
        let err = MalformedTrace::UnrecognizedTag { tag: 4, offset: 7, record: 2 };
        assert_eq!(err.to_string(), "unrecognized tag 0x04 at offset 7 (record 2)");
        assert_eq!(err.offset(), 7);
        assert_eq!(err.record(), 2);
    }

    #[test]
    fn test_truncated_display() {
        let err = MalformedTrace::TruncatedPayload {
            kind: EventKind::IndirectJump,
            offset: 0,
            record: 0,
            needed: 8,
            available: 3,
        };
        let s = err.to_string();
        assert!(s.contains("indirect-jump"));
        assert!(s.contains("need 8 bytes, 3 available"));
    }

    #[test]
    fn test_core_error_from_malformed() {
        let err: CoreError = MalformedTrace::UnrecognizedTag { tag: 9, offset: 0, record: 0 }.into();
        assert!(err.is_malformed());
        assert!(err.to_string().starts_with("malformed trace:"));
    }

    #[test]
    fn test_io_error_display() {
        let err = CoreError::Io {
            path: PathBuf::from("mission.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(!err.is_malformed());
        assert!(err.to_string().contains("mission.log"));
    }
}
