//! Decoded trace events.
//!
//! A [`Record`] is one tag plus its payload; the payload array width is
//! fixed by the variant. An [`Event`] is a record positioned in its source.

use oat_core::EventKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload byte recorded for a taken branch (ASCII `'1'`)
pub const BRANCH_TAKEN: u8 = b'1';

/// Payload byte recorded for a branch not taken (ASCII `'0'`)
pub const BRANCH_NOT_TAKEN: u8 = b'0';

/// One record's raw payload, keyed by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Record {
    /// Branch outcome byte
    BranchDecision([u8; 1]),
    /// Little-endian u64 target address
    IndirectJump([u8; 8]),
    /// Little-endian u32 function id
    FunctionReturn([u8; 4]),
}

impl Record {
    /// Branch decision; `taken` is encoded as ASCII `'1'`
    #[must_use]
    pub const fn branch(taken: bool) -> Self {
        Self::BranchDecision([if taken { BRANCH_TAKEN } else { BRANCH_NOT_TAKEN }])
    }

    /// Indirect jump to a little-endian target address
    #[must_use]
    pub const fn indirect_jump(address: u64) -> Self {
        Self::IndirectJump(address.to_le_bytes())
    }

    /// Function return carrying a little-endian function id
    #[must_use]
    pub const fn function_return(function_id: u32) -> Self {
        Self::FunctionReturn(function_id.to_le_bytes())
    }

    /// Kind determined by the variant
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::BranchDecision(_) => EventKind::BranchDecision,
            Self::IndirectJump(_) => EventKind::IndirectJump,
            Self::FunctionReturn(_) => EventKind::FunctionReturn,
        }
    }

    /// Raw payload bytes exactly as they appeared on the wire
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::BranchDecision(bytes) => &bytes[..],
            Self::IndirectJump(bytes) => &bytes[..],
            Self::FunctionReturn(bytes) => &bytes[..],
        }
    }

    /// Branch outcome; only the byte `'1'` counts as taken
    #[must_use]
    pub const fn taken(&self) -> Option<bool> {
        match self {
            Self::BranchDecision([byte]) => Some(*byte == BRANCH_TAKEN),
            _ => None,
        }
    }

    /// Jump target, for indirect jumps only
    #[must_use]
    pub const fn address(&self) -> Option<u64> {
        match self {
            Self::IndirectJump(bytes) => Some(u64::from_le_bytes(*bytes)),
            _ => None,
        }
    }

    /// Function id, for function returns only
    #[must_use]
    pub const fn function_id(&self) -> Option<u32> {
        match self {
            Self::FunctionReturn(bytes) => Some(u32::from_le_bytes(*bytes)),
            _ => None,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BranchDecision([byte]) => {
                let label = if *byte == BRANCH_TAKEN { "TRUE" } else { "FALSE" };
                write!(f, "Branch: {label}")
            }
            Self::IndirectJump(bytes) => {
                write!(f, "Indirect Jump -> {:#x}", u64::from_le_bytes(*bytes))
            }
            Self::FunctionReturn(bytes) => {
                write!(f, "Function Return ID: {}", u32::from_le_bytes(*bytes))
            }
        }
    }
}

/// A decoded record and where its payload starts in the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Offset of the first payload byte
    pub offset: usize,
    /// Decoded record
    pub record: Record,
}

impl Event {
    /// Event whose payload starts at `offset`
    #[must_use]
    pub const fn new(offset: usize, record: Record) -> Self {
        Self { offset, record }
    }

    /// Kind of the decoded record
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.record.kind()
    }

    /// Bytes fed to the trace digest for this event
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        self.record.payload()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
