//! Trace writer: the recording side of the format.

use crate::event::Record;
use std::io::{self, Write};

/// Appends tagged records to a byte sink
pub struct TraceWriter<W> {
    writer: W,
    records: u64,
}

impl<W: Write> TraceWriter<W> {
    /// Create a new writer
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    /// Write one record: its tag byte, then its payload
    ///
    /// # Errors
    ///
    /// Returns error if the underlying sink fails
    pub fn record(&mut self, record: &Record) -> io::Result<()> {
        self.writer.write_all(&[record.kind().tag()])?;
        self.writer.write_all(record.payload())?;
        self.records += 1;
        Ok(())
    }

    /// Record a branch outcome as ASCII `'1'` or `'0'`
    ///
    /// # Errors
    ///
    /// Returns error if the underlying sink fails
    pub fn branch(&mut self, taken: bool) -> io::Result<()> {
        self.record(&Record::branch(taken))
    }

    /// Append an indirect jump record
    ///
    /// # Errors
    ///
    /// Returns error if the underlying sink fails
    pub fn indirect_jump(&mut self, address: u64) -> io::Result<()> {
        self.record(&Record::indirect_jump(address))
    }

    /// Append a function return record
    ///
    /// # Errors
    ///
    /// Returns error if the underlying sink fails
    pub fn function_return(&mut self, function_id: u32) -> io::Result<()> {
        self.record(&Record::function_return(function_id))
    }

    /// Records written so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush the writer
    ///
    /// # Errors
    ///
    /// Returns error if the underlying sink fails
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
