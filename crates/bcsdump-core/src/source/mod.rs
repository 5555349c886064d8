//! Byte sources feeding the lump decoder.
//!
//! Decoding only needs a forward-only, finite stream that can hand out an
//! exact number of bytes or refuse. Sources never partially consume: a
//! request larger than `remaining()` fails with `SourceError::Exhausted`
//! and leaves the cursor where it was.

mod file;
mod slice;

pub use file::ImageFileSource;
pub use slice::SliceSource;

use thiserror::Error;

/// Forward-only byte stream consumed by `decode_one`.
pub trait ByteSource {
    /// Bytes left before end-of-stream.
    fn remaining(&self) -> usize;

    /// Bytes consumed since the source was opened.
    fn position(&self) -> usize;

    /// Read exactly `len` bytes.
    ///
    /// # Errors
    /// Returns `SourceError::Exhausted` when fewer than `len` bytes remain.
    fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>, SourceError>;

    /// Advance past exactly `len` bytes without returning them.
    ///
    /// # Errors
    /// Returns `SourceError::Exhausted` when fewer than `len` bytes remain.
    fn skip_exact(&mut self, len: usize) -> Result<(), SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source exhausted at offset {offset}: need {needed} bytes, {remaining} remaining")]
    Exhausted {
        needed: usize,
        remaining: usize,
        offset: usize,
    },
}

pub(crate) fn require_remaining<S: ByteSource + ?Sized>(
    source: &S,
    needed: usize,
) -> Result<(), SourceError> {
    let remaining = source.remaining();
    if remaining < needed {
        return Err(SourceError::Exhausted {
            needed,
            remaining,
            offset: source.position(),
        });
    }
    Ok(())
}
