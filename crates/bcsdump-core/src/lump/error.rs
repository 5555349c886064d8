use thiserror::Error;

use super::registry::{RecordKind, SizeRule};
use crate::tree::Tag;

/// Errors returned by lump decoding.
///
/// Any of these aborts the whole decode; there is no partial tree. An
/// unrecognized tag is not an error and never shows up here.
///
/// # Examples
/// ```
/// use bcsdump_core::{LumpError, SliceSource, decode_one};
///
/// let err = decode_one(&mut SliceSource::new(b"Bcs0")).unwrap_err();
/// assert!(matches!(err, LumpError::TruncatedHeader { .. }));
/// assert!(err.to_string().contains("truncated lump header"));
/// ```
#[derive(Debug, Error)]
pub enum LumpError {
    #[error("truncated lump header at offset {offset}: need 10 bytes, {remaining} remaining")]
    TruncatedHeader { offset: usize, remaining: usize },
    #[error(
        "truncated payload for {tag} at offset {offset}: need {needed} bytes, {remaining} remaining"
    )]
    TruncatedPayload {
        tag: Tag,
        needed: usize,
        remaining: usize,
        offset: usize,
    },
    #[error("size mismatch for {tag} ({kind}): expected {expected}, got {actual}")]
    SizeMismatch {
        tag: Tag,
        kind: RecordKind,
        expected: SizeRule,
        actual: u16,
    },
    #[error(
        "malformed container {tag}: child {child} needs {child_footprint} bytes, {bytes_left} left"
    )]
    MalformedContainer {
        tag: Tag,
        child: Tag,
        child_footprint: usize,
        bytes_left: usize,
    },
    #[error("lump nesting exceeds {depth} levels")]
    TooDeep { depth: usize },
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
