//! Run configuration.
//!
//! A `CarveConfig` can be loaded from a `.json`, `.yaml` or `.yml` file; every
//! field has a default so partial files are fine. Frontends layer their own
//! flags on top.

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Knobs that change how the segmenter partitions a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentPolicy {
    /// Emit an all-NUL run in front of a label as its own unknown segment
    /// instead of folding it into the label.
    pub preserve_nul_padding: bool,
}

/// Serialization format for the extraction manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestFormat {
    #[default]
    Json,
    Yaml,
}

impl ManifestFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ManifestFormat::Json => "json",
            ManifestFormat::Yaml => "yaml",
        }
    }

    /// File name the manifest is written under.
    pub fn file_name(self) -> &'static str {
        match self {
            ManifestFormat::Json => "manifest.json",
            ManifestFormat::Yaml => "manifest.yaml",
        }
    }
}

impl FromStr for ManifestFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ManifestFormat::Json),
            "yaml" | "yml" => Ok(ManifestFormat::Yaml),
            other => Err(anyhow!("Invalid manifest format '{other}' (expected json or yaml)")),
        }
    }
}

/// Full configuration for a carve run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveConfig {
    pub policy: SegmentPolicy,
    /// Write a manifest next to the extracted files.
    pub write_manifest: bool,
    pub manifest_format: ManifestFormat,
    /// Do not write `.dat` files for unknown segments.
    pub skip_unknown: bool,
}

/// Parse a config document. `ext` selects the syntax (`json`, `yaml`, `yml`).
pub fn parse_config(text: &str, ext: &str) -> Result<CarveConfig> {
    match ext.to_ascii_lowercase().as_str() {
        "json" => serde_json::from_str(text).context("Failed to parse config JSON"),
        "yaml" | "yml" => serde_yaml::from_str(text).context("Failed to parse config YAML"),
        other => bail!("Unsupported config file extension '{other}' (expected json, yaml or yml)"),
    }
}

/// Load a config file from disk, picking the syntax from its extension.
pub fn load_config(path: &Path) -> Result<CarveConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    parse_config(&text, ext).with_context(|| format!("Invalid config file {}", path.display()))
}
