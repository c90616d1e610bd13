//! OAT Trace Log
//!
//! The binary control-flow trace: one tag byte per record followed by a
//! fixed-width payload, no header, no padding, no terminator.
//! Decoding is lazy and bounds-checked; a trace must end on a record boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod decoder;
pub mod event;
pub mod writer;

pub use cursor::Cursor;
pub use decoder::{decode_all, TraceDecoder};
pub use event::{Event, Record};
pub use writer::TraceWriter;

pub use oat_core::{EventKind, MalformedTrace};
