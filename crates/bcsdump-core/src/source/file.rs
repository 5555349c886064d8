use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{ByteSource, SourceError, require_remaining};

const FILE_READER_BUFFER_SIZE: usize = 8 * 1024;

/// File-backed source; the file length is captured once at open time.
pub struct ImageFileSource {
    reader: BufReader<File>,
    len: usize,
    pos: usize,
}

impl ImageFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        Ok(Self {
            reader: BufReader::with_capacity(FILE_READER_BUFFER_SIZE, file),
            len,
            pos: 0,
        })
    }
}

impl ByteSource for ImageFileSource {
    fn remaining(&self) -> usize {
        self.len - self.pos
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>, SourceError> {
        require_remaining(self, len)?;
        let mut buf = vec![0u8; len];
        self.reader.read_exact(&mut buf)?;
        self.pos += len;
        Ok(buf)
    }

    fn skip_exact(&mut self, len: usize) -> Result<(), SourceError> {
        require_remaining(self, len)?;
        let offset = i64::try_from(len).map_err(|_| SourceError::Exhausted {
            needed: len,
            remaining: self.remaining(),
            offset: self.pos,
        })?;
        self.reader.seek_relative(offset)?;
        self.pos += len;
        Ok(())
    }
}
