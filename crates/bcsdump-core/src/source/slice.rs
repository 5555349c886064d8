use super::{ByteSource, SourceError, require_remaining};

/// In-memory source over a borrowed image buffer.
///
/// # Examples
/// ```
/// use bcsdump_core::{ByteSource, SliceSource};
///
/// let mut source = SliceSource::new(&[1, 2, 3]);
/// assert_eq!(source.read_exact_bytes(2)?, vec![1, 2]);
/// assert_eq!(source.remaining(), 1);
/// # Ok::<(), bcsdump_core::SourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>, SourceError> {
        require_remaining(self, len)?;
        let bytes = self.data[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(bytes)
    }

    fn skip_exact(&mut self, len: usize) -> Result<(), SourceError> {
        require_remaining(self, len)?;
        self.pos += len;
        Ok(())
    }
}
