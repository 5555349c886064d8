use std::fs;
use std::path::{Path, PathBuf};

const ROOT_TAG: &[u8; 8] = b"Bcs0008\0";
const NETWORK_TAG: &[u8; 8] = b"NetU002\0";
const SESSION_TAG: &[u8; 8] = b"Sson001\0";
const DECODERS_TAG: &[u8; 8] = b"DECS012\0";
const MARKER_TAG: &[u8; 8] = b"ENDEND1\0";
const UNKNOWN_TAG: &[u8; 8] = b"ZZZZZZZZ";

const NODE_NAME_LEN: usize = 16;

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_image(root.join("full_image").join("input.bin"), &full_image())?;
    write_image(root.join("unknown_tags").join("input.bin"), &unknown_tags_image())?;
    Ok(())
}

fn full_image() -> Vec<u8> {
    let mut node_name = [0u8; NODE_NAME_LEN];
    node_name[..11].copy_from_slice(b"bcs-node-01");
    let mut network = node_name.to_vec();
    network.extend_from_slice(&[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
    network.extend_from_slice(&4000u16.to_be_bytes());

    let mut session = vec![192, 168, 1, 20];
    session.extend_from_slice(&5100u16.to_be_bytes());

    let mut decoders = vec![
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    decoders.extend_from_slice(&[1, 2, 3, 4]);

    let mut children = lump(NETWORK_TAG, &network);
    children.extend(lump(SESSION_TAG, &session));
    children.extend(lump(DECODERS_TAG, &decoders));
    children.extend(lump(MARKER_TAG, &[]));
    lump(ROOT_TAG, &children)
}

fn unknown_tags_image() -> Vec<u8> {
    let mut children = lump(MARKER_TAG, &[]);
    children.extend(lump(UNKNOWN_TAG, &[1, 2, 3, 4, 5, 6]));
    lump(ROOT_TAG, &children)
}

fn lump(tag: &[u8; 8], payload: &[u8]) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

fn write_image(path: PathBuf, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {}", parent.display(), err))?;
    }
    fs::write(&path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
    report_written(&path, bytes.len());
    Ok(())
}

fn report_written(path: &Path, len: usize) {
    eprintln!("OK: {} bytes -> {}", len, path.display());
}
