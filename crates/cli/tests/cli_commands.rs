use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use dat_carver::commands::Manifest;
use dat_carver::sha256_bytes;
use predicates::prelude::*;
use tempfile::tempdir;

fn icns_record(payload: &[u8]) -> Vec<u8> {
    let mut out = b"icns".to_vec();
    out.extend_from_slice(&((payload.len() + 8) as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Two labelled icons followed by unrecognized trailing bytes.
fn sample_blob() -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"\x00\x00French\x00fr\x00");
    buf.extend(icns_record(b"abcdef"));
    buf.extend_from_slice(b"\x00\x00\x00German\x00de\x00");
    buf.extend(icns_record(b"ghij"));
    buf.extend_from_slice(b"\xff\xfe");
    buf
}

fn write_sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("layouts.dat");
    fs::write(&path, sample_blob()).expect("write sample blob");
    path
}

#[test]
fn scan_lists_named_segments() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path());

    cargo_bin_cmd!("dat-carver")
        .arg("scan")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Segments in"))
        .stdout(predicate::str::contains("1-French (fr).icns"))
        .stdout(predicate::str::contains("3-German (de).icns"))
        .stdout(predicate::str::contains("4-UNKNOWN.dat"));
}

#[test]
fn scan_json_reports_segments_and_hash() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path());

    let output = cargo_bin_cmd!("dat-carver")
        .arg("scan")
        .arg(&input)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body: serde_json::Value = serde_json::from_slice(&output).expect("scan json");

    assert_eq!(body["input_sha256"], sha256_bytes(&sample_blob()));
    let segments = body["segments"].as_array().expect("segments array");
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[1]["segment"]["kind"], "icon");
    assert_eq!(segments[1]["file_name"], "1-French (fr).icns");
    assert_eq!(segments[1]["label"]["code"], "fr");
    assert_eq!(segments[4]["segment"]["range"]["offset"], 51);
}

#[test]
fn scan_honours_preserve_padding_from_config_file() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path());
    let config = dir.path().join("carve.yaml");
    fs::write(&config, "policy:\n  preserve_nul_padding: true\n").expect("write config");

    let output = cargo_bin_cmd!("dat-carver")
        .arg("scan")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body: serde_json::Value = serde_json::from_slice(&output).expect("scan json");
    let segments = body["segments"].as_array().expect("segments array");
    assert_eq!(segments.len(), 7);
    assert_eq!(segments[0]["segment"]["kind"], "unknown");
    assert_eq!(segments[2]["file_name"], "2-French (fr).icns");
}

#[test]
fn extract_writes_one_file_per_segment() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path());
    let out = dir.path().join("out");
    fs::create_dir(&out).expect("create out dir");

    cargo_bin_cmd!("dat-carver")
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 5 file(s)"));

    let mut names: Vec<String> = fs::read_dir(&out)
        .expect("read out dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "0-LANG.txt",
            "1-French (fr).icns",
            "2-LANG.txt",
            "3-German (de).icns",
            "4-UNKNOWN.dat"
        ]
    );

    assert_eq!(fs::read(out.join("1-French (fr).icns")).unwrap(), icns_record(b"abcdef"));
    assert_eq!(fs::read(out.join("0-LANG.txt")).unwrap(), b"\x00\x00French\x00fr\x00");
    assert_eq!(fs::read(out.join("4-UNKNOWN.dat")).unwrap(), b"\xff\xfe");
}

#[test]
fn extract_writes_json_manifest() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path());
    let out = dir.path().join("out");
    fs::create_dir(&out).expect("create out dir");

    cargo_bin_cmd!("dat-carver")
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .arg("--manifest")
        .assert()
        .success();

    let manifest: Manifest =
        serde_json::from_str(&fs::read_to_string(out.join("manifest.json")).unwrap())
            .expect("manifest json");
    assert_eq!(manifest.input_sha256, sha256_bytes(&sample_blob()));
    assert_eq!(manifest.files.len(), 5);
    assert_eq!(manifest.files[1].label_name.as_deref(), Some("French"));
    assert_eq!(manifest.files[1].sha256, sha256_bytes(&icns_record(b"abcdef")));
    assert_eq!(manifest.files[4].label_name, None);
}

#[test]
fn extract_writes_yaml_manifest_and_skips_unknown() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path());
    let out = dir.path().join("out");
    fs::create_dir(&out).expect("create out dir");

    cargo_bin_cmd!("dat-carver")
        .arg("extract")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--manifest")
        .arg("--manifest-format")
        .arg("yaml")
        .arg("--skip-unknown")
        .assert()
        .success();

    assert!(!out.join("4-UNKNOWN.dat").exists());
    let manifest: Manifest =
        serde_yaml::from_str(&fs::read_to_string(out.join("manifest.yaml")).unwrap())
            .expect("manifest yaml");
    assert_eq!(manifest.files.len(), 4);
}

#[test]
fn extract_dry_run_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path());
    let out = dir.path().join("out");
    fs::create_dir(&out).expect("create out dir");

    cargo_bin_cmd!("dat-carver")
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write 5 file(s)"));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn extract_fails_when_output_dir_missing() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path());

    cargo_bin_cmd!("dat-carver")
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("please create it first"));

    assert!(!dir.path().join("nope").exists());
}

#[test]
fn extract_fails_on_empty_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("empty.dat");
    fs::write(&input, b"").expect("write empty");

    cargo_bin_cmd!("dat-carver")
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("input buffer is empty"));
}

#[test]
fn extract_fails_on_icon_running_past_end() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("truncated.dat");
    let mut buf = b"\x00\x00icns".to_vec();
    buf.extend_from_slice(&4096u32.to_be_bytes());
    buf.extend_from_slice(b"short");
    fs::write(&input, buf).expect("write truncated");
    let out = dir.path().join("out");
    fs::create_dir(&out).expect("create out dir");

    cargo_bin_cmd!("dat-carver")
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed icns record"));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}
