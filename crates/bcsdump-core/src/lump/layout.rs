pub const TAG_LEN: usize = 8;
pub const TAG_RANGE: std::ops::Range<usize> = 0..8;
pub const SIZE_RANGE: std::ops::Range<usize> = 8..10;
pub const HEADER_LEN: usize = 10;

pub const ROOT_TAG: &[u8; TAG_LEN] = b"Bcs0008\0";
pub const NETWORK_TAG: &[u8; TAG_LEN] = b"NetU002\0";
pub const SESSION_TAG: &[u8; TAG_LEN] = b"Sson001\0";
pub const DECODERS_TAG: &[u8; TAG_LEN] = b"DECS012\0";
pub const MARKER_TAG: &[u8; TAG_LEN] = b"ENDEND1\0";

pub const NETWORK_SIZE: usize = 24;
pub const NETWORK_NODE_NAME_RANGE: std::ops::Range<usize> = 0..16;
pub const NETWORK_HW_ADDRESS_RANGE: std::ops::Range<usize> = 16..22;
pub const NETWORK_PORT_RANGE: std::ops::Range<usize> = 22..24;

pub const SESSION_SIZE: usize = 6;
pub const SESSION_ADDRESS_RANGE: std::ops::Range<usize> = 0..4;
pub const SESSION_PORT_RANGE: std::ops::Range<usize> = 4..6;

pub const DECODERS_MIN_SIZE: usize = 17;
pub const DECODERS_UUID_RANGE: std::ops::Range<usize> = 0..16;

pub const MARKER_SIZE: usize = 0;

/// Nesting limit for container lumps. Real images nest one level.
pub const MAX_DEPTH: usize = 64;
