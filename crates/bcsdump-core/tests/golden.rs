use std::fs;
use std::path::Path;

use bcsdump_core::inspect_image_file;
use serde_json::Value;

fn load_expected_report(dir: &str) -> Value {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join("input.bin");
    let expected = load_expected_report(dir);

    let mut actual = inspect_image_file(&input).expect("inspect image");
    actual.generated_at = expected["generated_at"]
        .as_str()
        .expect("generated_at")
        .to_string();
    actual.input.path = expected["input"]["path"]
        .as_str()
        .expect("input path")
        .to_string();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    assert_eq!(actual_value, expected, "golden mismatch in {dir}");
}

#[test]
fn golden_full_image() {
    run_golden("tests/golden/full_image");
}

#[test]
fn golden_unknown_tags() {
    run_golden("tests/golden/unknown_tags");
}

#[test]
fn golden_unknown_tags_lists_the_tag() {
    let report = load_expected_report("tests/golden/unknown_tags");
    assert_eq!(report["summary"]["unknown_tags"][0], "ZZZZZZZZ");
    assert_eq!(report["input"]["bytes"], 36);
}

#[test]
fn golden_unknown_tags_root_size_covers_children() {
    let report = load_expected_report("tests/golden/unknown_tags");
    let root = &report["root"];
    let children = root["children"].as_array().expect("children");
    let footprints: u64 = children
        .iter()
        .map(|child| 10 + child["size"].as_u64().expect("size"))
        .sum();
    assert_eq!(root["size"], 26);
    assert_eq!(footprints, 26);
}
