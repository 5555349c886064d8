use std::fmt;

use serde::Serialize;

use super::layout;
use crate::tree::Tag;

/// Record kind selected by a lump's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Root,
    Network,
    Session,
    Decoders,
    Marker,
    Unknown,
}

const REGISTRY: [(&[u8; layout::TAG_LEN], RecordKind); 5] = [
    (layout::ROOT_TAG, RecordKind::Root),
    (layout::NETWORK_TAG, RecordKind::Network),
    (layout::SESSION_TAG, RecordKind::Session),
    (layout::DECODERS_TAG, RecordKind::Decoders),
    (layout::MARKER_TAG, RecordKind::Marker),
];

/// Resolve the record kind for a tag, falling back to `Unknown`.
///
/// Tags are compared as all 8 raw bytes, padding included.
///
/// # Examples
/// ```
/// use bcsdump_core::{RecordKind, Tag, kind_for};
///
/// assert_eq!(kind_for(&Tag::new(*b"NetU002\0")), RecordKind::Network);
/// assert_eq!(kind_for(&Tag::new(*b"XXXXXXXX")), RecordKind::Unknown);
/// ```
pub fn kind_for(tag: &Tag) -> RecordKind {
    REGISTRY
        .iter()
        .find(|(registered, _)| *registered == tag.as_bytes())
        .map(|(_, kind)| *kind)
        .unwrap_or(RecordKind::Unknown)
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Root,
        RecordKind::Network,
        RecordKind::Session,
        RecordKind::Decoders,
        RecordKind::Marker,
        RecordKind::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Root => "root",
            RecordKind::Network => "network",
            RecordKind::Session => "session",
            RecordKind::Decoders => "decoders",
            RecordKind::Marker => "marker",
            RecordKind::Unknown => "unknown",
        }
    }

    /// Registered tag for this kind; `None` for `Unknown`.
    pub fn tag(self) -> Option<Tag> {
        REGISTRY
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(tag, _)| Tag::new(**tag))
    }

    /// Payload size constraint enforced before the payload is read.
    pub fn size_rule(self) -> SizeRule {
        match self {
            RecordKind::Network => SizeRule::Exact(layout::NETWORK_SIZE),
            RecordKind::Session => SizeRule::Exact(layout::SESSION_SIZE),
            RecordKind::Decoders => SizeRule::AtLeast(layout::DECODERS_MIN_SIZE),
            RecordKind::Marker => SizeRule::Exact(layout::MARKER_SIZE),
            RecordKind::Root | RecordKind::Unknown => SizeRule::Any,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared-size constraint of a record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRule {
    Exact(usize),
    AtLeast(usize),
    Any,
}

impl SizeRule {
    pub fn accepts(self, size: u16) -> bool {
        let size = usize::from(size);
        match self {
            SizeRule::Exact(expected) => size == expected,
            SizeRule::AtLeast(min) => size >= min,
            SizeRule::Any => true,
        }
    }
}

impl fmt::Display for SizeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeRule::Exact(expected) => write!(f, "== {expected}"),
            SizeRule::AtLeast(min) => write!(f, ">= {min}"),
            SizeRule::Any => f.write_str("any"),
        }
    }
}
