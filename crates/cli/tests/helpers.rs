use std::path::{Path, PathBuf};

use carver_core::config::ManifestFormat;
use dat_carver::{
    ensure_output_dir, input_path_or_default, read_input, resolve_config, sha256_bytes,
    ConfigOverrides, DEFAULT_INPUT,
};
use tempfile::tempdir;

#[test]
fn sha256_bytes_matches_known_hash() {
    let hash = sha256_bytes(b"abc");
    assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn input_defaults_to_system_keyboard_layouts() {
    assert_eq!(input_path_or_default(None), PathBuf::from(DEFAULT_INPUT));
    assert_eq!(input_path_or_default(Some("blob.dat".into())), PathBuf::from("blob.dat"));
    assert!(DEFAULT_INPUT.ends_with("AppleKeyboardLayouts-L.dat"));
}

#[test]
fn ensure_output_dir_requires_existing_directory() {
    let tmp = tempdir().expect("tempdir");
    ensure_output_dir(tmp.path()).expect("existing dir is accepted");

    let missing = tmp.path().join("missing");
    let err = ensure_output_dir(&missing).unwrap_err();
    assert!(err.to_string().contains("please create it first"));
    assert!(!missing.exists(), "output dir must not be created");

    let file = tmp.path().join("file.bin");
    std::fs::write(&file, b"x").expect("write file");
    assert!(ensure_output_dir(&file).is_err());
}

#[test]
fn read_input_reports_missing_file() {
    let err = read_input(Path::new("/definitely/not/here.dat")).unwrap_err();
    assert!(err.to_string().contains("Failed to read input file"));
}

#[test]
fn resolve_config_applies_flags_over_file() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("carve.yaml");
    std::fs::write(&path, "write_manifest: false\nmanifest_format: json\n").expect("write config");

    let overrides = ConfigOverrides {
        preserve_padding: true,
        manifest: true,
        manifest_format: Some("yaml".into()),
        skip_unknown: false,
    };
    let config = resolve_config(Some(path.as_path()), &overrides).expect("resolve");
    assert!(config.policy.preserve_nul_padding);
    assert!(config.write_manifest);
    assert!(!config.skip_unknown);
    assert_eq!(config.manifest_format, ManifestFormat::Yaml);
}

#[test]
fn resolve_config_rejects_bad_manifest_format() {
    let overrides = ConfigOverrides { manifest_format: Some("xml".into()), ..Default::default() };
    let err = resolve_config(None, &overrides).unwrap_err();
    assert!(err.to_string().contains("Invalid manifest format"));
}
