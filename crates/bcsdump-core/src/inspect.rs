use std::fs;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::lump::error::LumpError;
use crate::lump::header::read_header;
use crate::lump::parser::decode_body;
use crate::lump::registry::RecordKind;
use crate::source::{ByteSource, ImageFileSource, SourceError};
use crate::tree::Tag;
use crate::{DEFAULT_GENERATED_AT, ImageReport, make_report};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Decode error: {0}")]
    Lump(#[from] LumpError),
    #[error("not a valid image: first lump is {tag} ({kind}), expected a root lump")]
    NotAnImage { tag: Tag, kind: RecordKind },
}

pub fn inspect_image_file(path: &Path) -> Result<ImageReport, InspectError> {
    let source = ImageFileSource::open(path)?;
    let mut report = inspect_source(path, source)?;
    report.generated_at = modified_rfc3339(path).unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    Ok(report)
}

/// Decode one image from `source` and wrap it in a report.
///
/// The first header must name a root lump; anything else is rejected
/// before its payload is touched. Bytes after the root are counted as
/// trailing bytes rather than decoded.
pub fn inspect_source<S: ByteSource>(
    path: &Path,
    mut source: S,
) -> Result<ImageReport, InspectError> {
    let input_bytes = (source.position() + source.remaining()) as u64;
    let header = read_header(&mut source)?;
    if header.kind() != RecordKind::Root {
        return Err(InspectError::NotAnImage {
            tag: header.name,
            kind: header.kind(),
        });
    }
    let root = decode_body(&mut source, header, 0)?;

    let trailing_bytes = source.remaining() as u64;
    let mut report = make_report(&path.display().to_string(), input_bytes, root);
    report.summary.trailing_bytes = trailing_bytes;
    Ok(report)
}

fn modified_rfc3339(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    OffsetDateTime::from(modified).format(&Rfc3339).ok()
}

#[cfg(test)]
mod tests {
    use super::{InspectError, inspect_source};
    use crate::lump::error::LumpError;
    use crate::lump::registry::RecordKind;
    use crate::source::SliceSource;
    use std::path::Path;

    #[test]
    fn non_root_first_lump_is_not_an_image() {
        let bytes = b"ENDEND1\0\x00\x00";
        let err = inspect_source(Path::new("mem"), SliceSource::new(bytes)).unwrap_err();
        assert!(matches!(err, InspectError::NotAnImage { .. }));
        assert!(err.to_string().contains("not a valid image"));
    }

    #[test]
    fn non_root_header_is_rejected_before_its_payload() {
        let bytes = b"GIF89a\0\0\xff\xffabcdef";
        let err = inspect_source(Path::new("mem"), SliceSource::new(bytes)).unwrap_err();
        match err {
            InspectError::NotAnImage { tag, kind } => {
                assert_eq!(tag.as_bytes(), b"GIF89a\0\0");
                assert_eq!(kind, RecordKind::Unknown);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn trailing_bytes_are_counted() {
        let mut bytes = b"Bcs0008\0\x00\x00".to_vec();
        bytes.extend_from_slice(&[0xff; 5]);
        let report = inspect_source(Path::new("mem"), SliceSource::new(&bytes)).unwrap();
        assert_eq!(report.input.bytes, 15);
        assert_eq!(report.summary.trailing_bytes, 5);
        assert_eq!(report.summary.lumps_total, 1);
    }

    #[test]
    fn decode_errors_propagate() {
        let bytes = b"Bcs0008\0\x00\x0aENDEND1";
        let err = inspect_source(Path::new("mem"), SliceSource::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            InspectError::Lump(LumpError::TruncatedHeader { .. })
        ));
    }
}
