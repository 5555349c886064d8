use bcsdump_core::{Lump, LumpBody};

/// Indented text tree, one lump per line.
pub fn render_tree(root: &Lump) -> String {
    let mut out = String::new();
    render_lump(root, 0, &mut out);
    out
}

fn render_lump(lump: &Lump, depth: usize, out: &mut String) {
    out.push_str(&format!(
        "{:indent$}{} {} size={}",
        "",
        lump.name(),
        lump.kind(),
        lump.size(),
        indent = depth * 2
    ));
    match lump.body() {
        LumpBody::Network(info) => {
            out.push_str(&format!(
                " node=\"{}\" mac={} port={}",
                info.node_name,
                info.mac_string(),
                info.port
            ));
        }
        LumpBody::Session(info) => {
            out.push_str(&format!(" endpoint={}", info.endpoint()));
        }
        LumpBody::Decoders(info) => {
            out.push_str(&format!(
                " uuid={} trailing={}",
                info.uuid_string(),
                info.trailing
            ));
        }
        LumpBody::Unknown { skipped } => {
            out.push_str(&format!(" skipped={skipped}"));
        }
        LumpBody::Root { .. } | LumpBody::Marker => {}
    }
    out.push('\n');
    for child in lump.children() {
        render_lump(child, depth + 1, out);
    }
}
