//! Record kinds and their fixed wire widths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a trace record.
///
/// The tag byte and payload width are fixed per kind and never depend on
/// the payload contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Conditional branch outcome
    BranchDecision,
    /// Indirect call or jump target
    IndirectJump,
    /// Function return, identified by function id
    FunctionReturn,
}

impl EventKind {
    /// All kinds in tag order
    pub const ALL: [Self; 3] = [Self::BranchDecision, Self::IndirectJump, Self::FunctionReturn];

    /// Resolve a tag byte
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::BranchDecision),
            2 => Some(Self::IndirectJump),
            3 => Some(Self::FunctionReturn),
            _ => None,
        }
    }

    /// Tag byte that introduces this kind on the wire
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::BranchDecision => 1,
            Self::IndirectJump => 2,
            Self::FunctionReturn => 3,
        }
    }

    /// Payload width in bytes
    #[must_use]
    pub const fn payload_len(self) -> usize {
        match self {
            Self::BranchDecision => 1,
            Self::IndirectJump => 8,
            Self::FunctionReturn => 4,
        }
    }

    /// Human-readable name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BranchDecision => "branch",
            Self::IndirectJump => "indirect-jump",
            Self::FunctionReturn => "function-return",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_payload_widths() {
        assert_eq!(EventKind::BranchDecision.payload_len(), 1);
        assert_eq!(EventKind::IndirectJump.payload_len(), 8);
        assert_eq!(EventKind::FunctionReturn.payload_len(), 4);
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(EventKind::from_tag(0), None);
        assert_eq!(EventKind::from_tag(4), None);
        assert_eq!(EventKind::from_tag(0xFF), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(EventKind::IndirectJump.to_string(), "indirect-jump");
    }
}
