//! Lazy decoder for the binary trace format.
//!
//! ```text
//! Trace  := Record*
//! Record := Tag(1 byte) Payload(N bytes)
//!   1 -> N=1  branch decision
//!   2 -> N=8  indirect jump (u64 LE)
//!   3 -> N=4  function return (u32 LE)
//! ```

use crate::cursor::Cursor;
use crate::event::{Event, Record};
use oat_core::{EventKind, MalformedTrace};
use std::iter::FusedIterator;

/// Decodes records left to right until the cursor reaches the end of the
/// trace exactly.
///
/// The first framing error is yielded once and ends iteration. A decoder
/// cannot be rewound; decode the same bytes again with a new decoder.
#[derive(Debug, Clone)]
pub struct TraceDecoder<'a> {
    cursor: Cursor<'a>,
    record: usize,
    failed: bool,
}

impl<'a> TraceDecoder<'a> {
    /// Create a decoder positioned at the first tag
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            record: 0,
            failed: false,
        }
    }

    /// Current byte position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor.pos()
    }

    /// Number of records decoded so far
    #[must_use]
    pub const fn records(&self) -> usize {
        self.record
    }

    fn decode_record(&mut self, offset: usize, tag: u8) -> Result<Event, MalformedTrace> {
        let kind = EventKind::from_tag(tag).ok_or(MalformedTrace::UnrecognizedTag {
            tag,
            offset,
            record: self.record,
        })?;

        let payload_offset = self.cursor.pos();
        let available = self.cursor.remaining();
        let record = match kind {
            EventKind::BranchDecision => self.cursor.read_array().map(Record::BranchDecision),
            EventKind::IndirectJump => self.cursor.read_array().map(Record::IndirectJump),
            EventKind::FunctionReturn => self.cursor.read_array().map(Record::FunctionReturn),
        }
        .ok_or(MalformedTrace::TruncatedPayload {
            kind,
            offset,
            record: self.record,
            needed: kind.payload_len(),
            available,
        })?;

        tracing::trace!(record = self.record, offset = payload_offset, %kind, "decoded record");
        self.record += 1;
        Ok(Event::new(payload_offset, record))
    }
}

impl Iterator for TraceDecoder<'_> {
    type Item = Result<Event, MalformedTrace>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let offset = self.cursor.pos();
        let tag = self.cursor.read_u8()?;
        let item = self.decode_record(offset, tag);
        self.failed = item.is_err();
        Some(item)
    }
}

impl FusedIterator for TraceDecoder<'_> {}

/// Decode a whole trace eagerly
///
/// # Errors
///
/// Returns the first framing error in the trace
pub fn decode_all(data: &[u8]) -> Result<Vec<Event>, MalformedTrace> {
    TraceDecoder::new(data).collect()
}
