use std::net::Ipv4Addr;

use super::error::LumpError;
use super::header::{LumpHeader, read_header};
use super::layout;
use super::reader::PayloadReader;
use super::registry::RecordKind;
use crate::source::{ByteSource, SourceError};
use crate::tree::{DecoderInfo, Lump, LumpBody, NetworkInfo, SessionInfo};

/// Decode one lump (and, for containers, its whole subtree).
///
/// The source is left positioned right after the lump. The first lump of
/// an image is expected to be a root, but that is the caller's check.
///
/// # Examples
/// ```
/// use bcsdump_core::{RecordKind, SliceSource, decode_one};
///
/// let mut image = b"Bcs0008\0\x00\x0a".to_vec();
/// image.extend_from_slice(b"ENDEND1\0\x00\x00");
///
/// let root = decode_one(&mut SliceSource::new(&image))?;
/// assert_eq!(root.kind(), RecordKind::Root);
/// assert_eq!(root.children()[0].kind(), RecordKind::Marker);
/// # Ok::<(), bcsdump_core::LumpError>(())
/// ```
///
/// # Errors
/// Any truncation, size violation, or container overrun aborts the whole
/// decode; see `LumpError`.
pub fn decode_one<S: ByteSource + ?Sized>(source: &mut S) -> Result<Lump, LumpError> {
    decode_at_depth(source, 0)
}

fn decode_at_depth<S: ByteSource + ?Sized>(
    source: &mut S,
    depth: usize,
) -> Result<Lump, LumpError> {
    let header = read_header(source)?;
    decode_body(source, header, depth)
}

pub(crate) fn decode_body<S: ByteSource + ?Sized>(
    source: &mut S,
    header: LumpHeader,
    depth: usize,
) -> Result<Lump, LumpError> {
    let kind = header.kind();
    check_size(&header, kind)?;
    let body = match kind {
        RecordKind::Root => decode_container(source, &header, depth)?,
        RecordKind::Network => decode_network(source, &header)?,
        RecordKind::Session => decode_session(source, &header)?,
        RecordKind::Decoders => decode_decoders(source, &header)?,
        RecordKind::Marker => LumpBody::Marker,
        RecordKind::Unknown => decode_unknown(source, &header)?,
    };
    Ok(Lump::new(header.name, header.size, body))
}

fn check_size(header: &LumpHeader, kind: RecordKind) -> Result<(), LumpError> {
    let rule = kind.size_rule();
    if !rule.accepts(header.size) {
        return Err(LumpError::SizeMismatch {
            tag: header.name,
            kind,
            expected: rule,
            actual: header.size,
        });
    }
    Ok(())
}

fn decode_container<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &LumpHeader,
    depth: usize,
) -> Result<LumpBody, LumpError> {
    let mut bytes_left = usize::from(header.size);
    let mut children = Vec::new();
    while bytes_left > 0 {
        if depth >= layout::MAX_DEPTH {
            return Err(LumpError::TooDeep {
                depth: layout::MAX_DEPTH,
            });
        }
        let child = read_header(source)?;
        let child_footprint = child.footprint();
        if child_footprint > bytes_left {
            return Err(LumpError::MalformedContainer {
                tag: header.name,
                child: child.name,
                child_footprint,
                bytes_left,
            });
        }
        children.push(decode_body(source, child, depth + 1)?);
        bytes_left -= child_footprint;
    }
    Ok(LumpBody::Root { children })
}

fn decode_network<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &LumpHeader,
) -> Result<LumpBody, LumpError> {
    let payload = read_payload(source, header)?;
    let reader = PayloadReader::new(&payload);
    Ok(LumpBody::Network(NetworkInfo {
        node_name: reader.read_zstring(layout::NETWORK_NODE_NAME_RANGE)?,
        hardware_address: reader.read_array(layout::NETWORK_HW_ADDRESS_RANGE)?,
        port: reader.read_u16_be(layout::NETWORK_PORT_RANGE)?,
    }))
}

fn decode_session<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &LumpHeader,
) -> Result<LumpBody, LumpError> {
    let payload = read_payload(source, header)?;
    let reader = PayloadReader::new(&payload);
    let octets: [u8; 4] = reader.read_array(layout::SESSION_ADDRESS_RANGE)?;
    Ok(LumpBody::Session(SessionInfo {
        address: Ipv4Addr::from(octets),
        port: reader.read_u16_be(layout::SESSION_PORT_RANGE)?,
    }))
}

fn decode_decoders<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &LumpHeader,
) -> Result<LumpBody, LumpError> {
    let payload = read_payload(source, header)?;
    let reader = PayloadReader::new(&payload);
    Ok(LumpBody::Decoders(DecoderInfo {
        uuid: reader.read_array(layout::DECODERS_UUID_RANGE)?,
        trailing: payload.len() - layout::DECODERS_UUID_RANGE.end,
    }))
}

fn decode_unknown<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &LumpHeader,
) -> Result<LumpBody, LumpError> {
    let offset = source.position();
    let needed = usize::from(header.size);
    source
        .skip_exact(needed)
        .map_err(|err| payload_error(err, header, needed, offset))?;
    Ok(LumpBody::Unknown { skipped: needed })
}

fn read_payload<S: ByteSource + ?Sized>(
    source: &mut S,
    header: &LumpHeader,
) -> Result<Vec<u8>, LumpError> {
    let offset = source.position();
    let needed = usize::from(header.size);
    source
        .read_exact_bytes(needed)
        .map_err(|err| payload_error(err, header, needed, offset))
}

fn payload_error(err: SourceError, header: &LumpHeader, needed: usize, offset: usize) -> LumpError {
    match err {
        SourceError::Exhausted { remaining, .. } => LumpError::TruncatedPayload {
            tag: header.name,
            needed,
            remaining,
            offset,
        },
        SourceError::Io(err) => LumpError::Io(err),
    }
}
