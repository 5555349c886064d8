//! bcsdump core library for decoding device EEPROM images.
//!
//! An image is a tree of self-describing records ("lumps"): an 8-byte tag,
//! a big-endian 16-bit payload length, then the payload. Byte sources feed
//! the lump decoder (layout/registry/header/reader/parser), which builds a
//! read-only tree; the inspection layer wraps that tree into a report for
//! the CLI. Decoding is byte-oriented and side-effect free; file access is
//! isolated in `source`.
//!
//! Invariants:
//! - Every decoder consumes exactly its declared payload length.
//! - A container's children partition its payload exactly.
//! - Unknown tags decode as opaque lumps, never as errors.
//! - Any other decode failure aborts the whole image.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use bcsdump_core::inspect_image_file;
//!
//! let report = inspect_image_file(Path::new("device.eeprom"))?;
//! println!("lumps: {}", report.summary.lumps_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

mod inspect;
mod lump;
mod source;
mod tree;

pub use inspect::{InspectError, inspect_image_file, inspect_source};
pub use lump::decode_one;
pub use lump::error::LumpError;
pub use lump::header::{LumpHeader, read_header};
pub use lump::layout::{HEADER_LEN, MAX_DEPTH};
pub use lump::registry::{RecordKind, SizeRule, kind_for};
pub use source::{ByteSource, ImageFileSource, SliceSource, SourceError};
pub use tree::{DecoderInfo, Lump, LumpBody, NetworkInfo, SessionInfo, Tag, Walk};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the input has no modification time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Inspection report for one image, with the full decoded tree.
///
/// Serialize-only: the tree is produced by decoding, never by parsing JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the input's last modification.
    pub generated_at: String,
    /// Input image metadata.
    pub input: InputInfo,
    /// Counts derived from the tree.
    pub summary: ImageSummary,
    /// Decoded root lump.
    pub root: Lump,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use bcsdump_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "bcsdump".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "bcsdump");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input image metadata embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Tree-wide counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageSummary {
    /// Number of lumps in the tree, root included.
    pub lumps_total: u64,
    /// Lump count per record kind.
    pub by_kind: BTreeMap<RecordKind, u64>,
    /// Distinct unrecognized tags in first-seen order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_tags: Vec<String>,
    /// Bytes left in the input after the root lump.
    pub trailing_bytes: u64,
}

impl ImageSummary {
    pub fn from_tree(root: &Lump) -> Self {
        let mut unknown_tags: Vec<String> = Vec::new();
        for lump in root.walk() {
            if lump.kind() == RecordKind::Unknown {
                let tag = lump.name().to_string();
                if !unknown_tags.contains(&tag) {
                    unknown_tags.push(tag);
                }
            }
        }
        Self {
            lumps_total: root.walk().count() as u64,
            by_kind: root.count_by_kind(),
            unknown_tags,
            trailing_bytes: 0,
        }
    }
}

/// Build a report around a decoded root with summary counts filled in.
pub fn make_report(input_path: &str, input_bytes: u64, root: Lump) -> ImageReport {
    ImageReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "bcsdump".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: ImageSummary::from_tree(&root),
        root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Vec<u8> {
        let mut bytes = b"Bcs0008\0\x00\x21".to_vec();
        bytes.extend_from_slice(b"XXXXXXXX\x00\x01a");
        bytes.extend_from_slice(b"XXXXXXXX\x00\x02bc");
        bytes.extend_from_slice(b"ENDEND1\0\x00\x00");
        bytes
    }

    #[test]
    fn summary_counts_and_dedups_unknown_tags() {
        let root = decode_one(&mut SliceSource::new(&image())).unwrap();
        let summary = ImageSummary::from_tree(&root);
        assert_eq!(summary.lumps_total, 4);
        assert_eq!(summary.by_kind[&RecordKind::Unknown], 2);
        assert_eq!(summary.unknown_tags, vec!["XXXXXXXX".to_string()]);
    }

    #[test]
    fn report_omits_empty_unknown_tags() {
        let root = decode_one(&mut SliceSource::new(b"Bcs0008\0\x00\x00")).unwrap();
        let report = make_report("device.eeprom", 10, root);
        let value = serde_json::to_value(&report).expect("report json");
        assert_eq!(value["report_version"], REPORT_VERSION);
        assert_eq!(value["summary"]["by_kind"]["root"], 1);
        assert!(value["summary"].get("unknown_tags").is_none());
        assert_eq!(value["root"]["children"].as_array().map(Vec::len), Some(0));
    }
}
