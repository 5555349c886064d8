use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bcsdump"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(name)
        .join("input.bin")
}

#[test]
fn help_supports_inspect_and_dump() {
    cmd()
        .arg("image")
        .arg("inspect")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("image")
        .arg("dump")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json_tree() {
    let assert = cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("full_image"))
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["root"]["kind"], "root");
    assert_eq!(value["root"]["children"][0]["node_name"], "bcs-node-01");
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("full_image"))
        .arg("-o")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = std::fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["summary"]["lumps_total"], 5);
}

#[test]
fn report_into_nested_missing_dirs_is_created() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("a").join("b").join("report.json");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("unknown_tags"))
        .arg("-o")
        .arg(&report)
        .assert()
        .success();

    assert!(report.exists());
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("full_image"))
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("full_image"))
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("full_image"))
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("image.bin");
    std::fs::copy(fixture("full_image"), &input).expect("copy fixture");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn list_unknown_outputs_tags() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("unknown_tags"))
        .arg("-o")
        .arg(report)
        .arg("--list-unknown")
        .assert()
        .success()
        .stderr(contains("Unknown lumps:").and(contains("ZZZZZZZZ (1)")));
}

#[test]
fn strict_fails_when_unknown_lumps_present() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("unknown_tags"))
        .arg("-o")
        .arg(report)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("unknown lumps present"));
}

#[test]
fn strict_passes_on_fully_known_image() {
    cmd()
        .arg("image")
        .arg("inspect")
        .arg(fixture("full_image"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn non_root_image_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("marker.bin");
    std::fs::write(&input, b"ENDEND1\0\x00\x00").expect("write image");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("not a valid image").and(contains("hint:")));
}

#[test]
fn foreign_file_with_oversized_header_is_not_an_image() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("picture.gif");
    std::fs::write(&input, b"GIF89a\0\0\xff\xffabcdef").expect("write image");

    cmd()
        .arg("image")
        .arg("inspect")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("not a valid image").and(contains("truncated").not()));
}

#[test]
fn truncated_image_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("truncated.bin");
    let bytes = std::fs::read(fixture("full_image")).expect("read fixture");
    std::fs::write(&input, &bytes[..bytes.len() - 1]).expect("write image");

    cmd()
        .arg("image")
        .arg("tree")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("truncated lump header"));
}

#[test]
fn tree_prints_indented_lumps() {
    cmd()
        .arg("image")
        .arg("tree")
        .arg(fixture("full_image"))
        .assert()
        .success()
        .stdout(
            contains("Bcs0008\\0 root size=90")
                .and(contains("  NetU002\\0 network size=24 node=\"bcs-node-01\""))
                .and(contains("mac=00:1a:2b:3c:4d:5e port=4000"))
                .and(contains("  Sson001\\0 session size=6 endpoint=192.168.1.20:5100"))
                .and(contains("uuid=00112233-4455-6677-8899-aabbccddeeff trailing=4")),
        );
}

#[test]
fn glob_pattern_resolves_single_file() {
    let pattern = repo_root()
        .join("tests")
        .join("golden")
        .join("full_*")
        .join("input.bin");

    cmd()
        .arg("image")
        .arg("tree")
        .arg(pattern)
        .assert()
        .success()
        .stdout(contains("root size=90"));
}

#[test]
fn version_reports_build_metadata() {
    cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(contains("bcsdump ").and(contains("commit")));
}
