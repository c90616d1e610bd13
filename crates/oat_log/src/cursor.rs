//! Read cursor over an in-memory trace.

/// Forward-only position in a byte slice.
///
/// Every read is bounds-checked; a read that does not fit leaves the
/// position untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current byte offset
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.position
    }

    /// Bytes left after the current position
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Whether every byte has been consumed
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    /// Read exactly `N` bytes
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.position.checked_add(N)?;
        let bytes: [u8; N] = self.data.get(self.position..end)?.try_into().ok()?;
        self.position = end;
        Some(bytes)
    }
}
