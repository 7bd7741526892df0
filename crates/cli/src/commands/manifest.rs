use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use carver_core::config::ManifestFormat;
use carver_core::model::{NamedSegment, SegmentKind};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::sha256_bytes;

/// One extracted file as recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file_name: String,
    pub kind: SegmentKind,
    pub offset: usize,
    pub length: usize,
    pub sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_code: Option<String>,
}

/// Summary of an extraction run, written next to the extracted files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub tool_version: String,
    pub input: String,
    pub input_sha256: String,
    pub generated_at: String,
    pub files: Vec<ManifestEntry>,
}

/// Build a manifest covering the segments that were written.
pub fn build_manifest(input: &Path, buf: &[u8], written: &[NamedSegment]) -> Result<Manifest> {
    let files = written
        .iter()
        .map(|named| {
            let bytes = named.segment.bytes(buf).ok_or_else(|| {
                anyhow!("Segment {} lies outside the input buffer", named.file_name)
            })?;
            Ok(ManifestEntry {
                file_name: named.file_name.clone(),
                kind: named.segment.kind,
                offset: named.segment.range.offset,
                length: named.segment.range.len,
                sha256: sha256_bytes(bytes),
                label_name: named.label.as_ref().map(|l| l.name.clone()),
                label_code: named.label.as_ref().and_then(|l| l.code.clone()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Manifest {
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        input: input.display().to_string(),
        input_sha256: sha256_bytes(buf),
        generated_at: Utc::now().to_rfc3339(),
        files,
    })
}

/// Serialize `manifest` into `output_dir` and return the path written.
pub fn write_manifest(
    output_dir: &Path,
    manifest: &Manifest,
    format: ManifestFormat,
) -> Result<PathBuf> {
    let body = match format {
        ManifestFormat::Json => serde_json::to_string_pretty(manifest)
            .context("Failed to serialize manifest to JSON")?,
        ManifestFormat::Yaml => {
            serde_yaml::to_string(manifest).context("Failed to serialize manifest to YAML")?
        }
    };
    let path = output_dir.join(format.file_name());
    fs::write(&path, body)
        .with_context(|| format!("Failed to write manifest at {}", path.display()))?;
    Ok(path)
}
