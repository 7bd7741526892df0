use std::path::Path;

use anyhow::{Context, Result};
use carver_core::config::CarveConfig;
use carver_core::model::NamedSegment;
use serde::Serialize;

use crate::commands::{describe_segment, load_and_carve};
use crate::sha256_bytes;

#[derive(Debug, Serialize)]
pub struct ScanSnapshot {
    pub input: String,
    pub input_len: usize,
    pub input_sha256: String,
    pub segments: Vec<NamedSegment>,
    pub issues: Vec<String>,
}

/// List the segments found in `input` without writing anything.
pub fn scan_command(input: &Path, config: &CarveConfig, json: bool) -> Result<()> {
    let (buf, report) = load_and_carve(input, config)?;

    if json {
        let snapshot = ScanSnapshot {
            input: input.display().to_string(),
            input_len: buf.len(),
            input_sha256: sha256_bytes(&buf),
            issues: report.issues.iter().map(|e| e.to_string()).collect(),
            segments: report.segments,
        };
        let serialized =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize scan to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Segments in {} ({}):", input.display(), report.segments.len());
    for (index, named) in report.segments.iter().enumerate() {
        println!("  {}", describe_segment(index, named));
    }
    if !report.issues.is_empty() {
        println!("Issues ({}):", report.issues.len());
        for issue in &report.issues {
            println!("  - {issue}");
        }
    }

    Ok(())
}
