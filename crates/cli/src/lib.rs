use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use carver_core::config::{load_config, CarveConfig, ManifestFormat};
use sha2::{Digest, Sha256};

pub mod commands;

/// Input used when none is given on the command line.
pub const DEFAULT_INPUT: &str = "/System/Library/Keyboard Layouts/AppleKeyboardLayouts.bundle/Contents/Resources/AppleKeyboardLayouts-L.dat";

/// Command-line values that override a loaded config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub preserve_padding: bool,
    pub manifest: bool,
    pub manifest_format: Option<String>,
    pub skip_unknown: bool,
}

/// Load the config file (if any) and apply command-line overrides.
///
/// Flags only ever switch features on; a flag that is absent leaves the file's
/// value alone.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<CarveConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => CarveConfig::default(),
    };

    config.policy.preserve_nul_padding |= overrides.preserve_padding;
    config.write_manifest |= overrides.manifest;
    config.skip_unknown |= overrides.skip_unknown;
    if let Some(format) = &overrides.manifest_format {
        config.manifest_format = format.parse::<ManifestFormat>()?;
    }
    Ok(config)
}

/// Resolve the input path, falling back to [`DEFAULT_INPUT`].
pub fn input_path_or_default(input: Option<PathBuf>) -> PathBuf {
    input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

/// Read the whole input file into memory.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read input file {}", path.display()))
}

/// Fail unless `path` is an existing directory. Nothing is created.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("Output directory {} doesn't exist, please create it first", path.display());
    }
    Ok(())
}

/// Compute the SHA-256 of a byte slice as lowercase hex.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
