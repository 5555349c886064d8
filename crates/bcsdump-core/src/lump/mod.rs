//! Lump decoding engine.
//!
//! Layered like a protocol decoder:
//! - `layout`: tags, header length, fixed payload sizes and field ranges
//! - `registry`: tag to record-kind dispatch, unknown tags fall back
//! - `header`: the 10-byte tag + big-endian size header
//! - `reader`: bounds-checked field access inside a payload
//! - `parser`: per-kind decoders and the recursive container walk
//! - `error`: explicit decode failures
//!
//! Every decoder consumes exactly the declared payload length, so sibling
//! decoding resumes at the next lump boundary.

pub mod error;
pub mod header;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod registry;

pub use parser::decode_one;
