use super::error::LumpError;

/// Bounds-checked field access over a fully read payload or header.
pub struct PayloadReader<'a> {
    payload: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], LumpError> {
        self.payload.get(range.clone()).ok_or(LumpError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    pub fn read_array<const N: usize>(
        &self,
        range: std::ops::Range<usize>,
    ) -> Result<[u8; N], LumpError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| LumpError::TooShort {
            needed: N,
            actual: bytes.len(),
        })
    }

    /// Device byte order is big-endian for every multi-byte integer.
    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, LumpError> {
        let bytes: [u8; 2] = self.read_array(range)?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Fixed-width string field: everything before the first NUL, or the
    /// whole field when it holds no NUL.
    pub fn read_zstring(&self, range: std::ops::Range<usize>) -> Result<String, LumpError> {
        let bytes = self.read_slice(range)?;
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}
