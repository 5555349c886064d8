use super::error::LumpError;
use super::layout;
use super::reader::PayloadReader;
use super::registry::{RecordKind, kind_for};
use crate::source::{ByteSource, SourceError};
use crate::tree::Tag;

/// Fixed 10-byte lump header: raw tag plus big-endian payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LumpHeader {
    pub name: Tag,
    pub size: u16,
}

impl LumpHeader {
    pub fn kind(&self) -> RecordKind {
        kind_for(&self.name)
    }

    /// On-wire length of the whole lump, header included.
    pub fn footprint(&self) -> usize {
        layout::HEADER_LEN + usize::from(self.size)
    }
}

/// Read one header from a source positioned at a lump boundary.
///
/// # Errors
/// Returns `LumpError::TruncatedHeader` when fewer than 10 bytes remain.
pub fn read_header<S: ByteSource + ?Sized>(source: &mut S) -> Result<LumpHeader, LumpError> {
    let offset = source.position();
    let bytes = source
        .read_exact_bytes(layout::HEADER_LEN)
        .map_err(|err| match err {
            SourceError::Exhausted { remaining, .. } => {
                LumpError::TruncatedHeader { offset, remaining }
            }
            SourceError::Io(err) => LumpError::Io(err),
        })?;
    let reader = PayloadReader::new(&bytes);
    let name = Tag::new(reader.read_array(layout::TAG_RANGE)?);
    let size = reader.read_u16_be(layout::SIZE_RANGE)?;
    Ok(LumpHeader { name, size })
}
