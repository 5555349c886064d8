//! Decoded lump tree.
//!
//! The tree is built in one pass by `decode_one` and is read-only
//! afterwards: fields are private and only exposed through accessors.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

use serde::{Serialize, Serializer};

use crate::lump::layout;
use crate::lump::registry::RecordKind;

/// Raw 8-byte lump tag, kept verbatim (padding included).
///
/// # Examples
/// ```
/// use bcsdump_core::Tag;
///
/// let tag = Tag::new(*b"Bcs0008\0");
/// assert_eq!(tag.to_string(), "Bcs0008\\0");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag([u8; layout::TAG_LEN]);

impl Tag {
    pub const fn new(bytes: [u8; layout::TAG_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; layout::TAG_LEN] {
        &self.0
    }
}

/// ASCII rendering; NUL prints as `\0`, other non-printables as `\xNN`.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            match b {
                0 => f.write_str("\\0")?,
                b'\\' => f.write_str("\\\\")?,
                0x20..=0x7e => write!(f, "{}", b as char)?,
                _ => write!(f, "\\x{b:02x}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{self}\")")
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One decoded lump: tag, declared payload size, and kind-specific body.
///
/// # Examples
/// ```
/// use bcsdump_core::{RecordKind, SliceSource, decode_one};
///
/// let mut image = b"Bcs0008\0\x00\x10".to_vec();
/// image.extend_from_slice(b"XXXXXXXX\x00\x06abcdef");
///
/// let root = decode_one(&mut SliceSource::new(&image))?;
/// assert_eq!(root.footprint(), 26);
/// assert_eq!(root.find(RecordKind::Unknown).map(|l| l.size()), Some(6));
/// # Ok::<(), bcsdump_core::LumpError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lump {
    name: Tag,
    size: u16,
    #[serde(flatten)]
    body: LumpBody,
}

impl Lump {
    pub(crate) fn new(name: Tag, size: u16, body: LumpBody) -> Self {
        Self { name, size, body }
    }

    pub fn name(&self) -> Tag {
        self.name
    }

    /// Payload length in bytes, excluding the 10-byte header.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// On-wire length, header included.
    pub fn footprint(&self) -> usize {
        layout::HEADER_LEN + usize::from(self.size)
    }

    pub fn kind(&self) -> RecordKind {
        self.body.kind()
    }

    pub fn body(&self) -> &LumpBody {
        &self.body
    }

    /// Child lumps in on-wire order; empty for non-containers.
    pub fn children(&self) -> &[Lump] {
        match &self.body {
            LumpBody::Root { children } => children,
            _ => &[],
        }
    }

    /// Depth-first, pre-order walk over this lump and its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// First lump of `kind` in pre-order, this lump included.
    pub fn find(&self, kind: RecordKind) -> Option<&Lump> {
        self.walk().find(|lump| lump.kind() == kind)
    }

    pub fn count_by_kind(&self) -> BTreeMap<RecordKind, u64> {
        let mut counts = BTreeMap::new();
        for lump in self.walk() {
            *counts.entry(lump.kind()).or_insert(0) += 1;
        }
        counts
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Lump>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Lump;

    fn next(&mut self) -> Option<Self::Item> {
        let lump = self.stack.pop()?;
        self.stack.extend(lump.children().iter().rev());
        Some(lump)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LumpBody {
    Root { children: Vec<Lump> },
    Network(NetworkInfo),
    Session(SessionInfo),
    Decoders(DecoderInfo),
    Marker,
    Unknown { skipped: usize },
}

impl LumpBody {
    pub fn kind(&self) -> RecordKind {
        match self {
            LumpBody::Root { .. } => RecordKind::Root,
            LumpBody::Network(_) => RecordKind::Network,
            LumpBody::Session(_) => RecordKind::Session,
            LumpBody::Decoders(_) => RecordKind::Decoders,
            LumpBody::Marker => RecordKind::Marker,
            LumpBody::Unknown { .. } => RecordKind::Unknown,
        }
    }
}

/// Network identity of the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub node_name: String,
    #[serde(serialize_with = "serialize_mac")]
    pub hardware_address: [u8; 6],
    pub port: u16,
}

impl NetworkInfo {
    /// Colon-separated lowercase hex, e.g. `00:1a:2b:3c:4d:5e`.
    pub fn mac_string(&self) -> String {
        format_mac(&self.hardware_address)
    }
}

/// Session endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub address: Ipv4Addr,
    pub port: u16,
}

impl SessionInfo {
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecoderInfo {
    #[serde(serialize_with = "serialize_uuid")]
    pub uuid: [u8; 16],
    /// Payload bytes after the UUID, present on the wire but not decoded.
    pub trailing: usize,
}

impl DecoderInfo {
    /// Canonical 8-4-4-4-12 hex of the UUID bytes in stored order.
    pub fn uuid_string(&self) -> String {
        format_uuid(&self.uuid)
    }
}

fn format_mac(bytes: &[u8; 6]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

fn format_uuid(bytes: &[u8; 16]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

fn serialize_mac<S: Serializer>(bytes: &[u8; 6], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_mac(bytes))
}

fn serialize_uuid<S: Serializer>(bytes: &[u8; 16], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_uuid(bytes))
}
