use std::path::Path;

use anyhow::{Context, Result};
use carver_core::config::CarveConfig;
use carver_core::model::NamedSegment;
use carver_core::services::{carve, LabelingReport};

use crate::read_input;

/// Read `input` and run segmentation plus labeling under `config`.
pub fn load_and_carve(input: &Path, config: &CarveConfig) -> Result<(Vec<u8>, LabelingReport)> {
    let buf = read_input(input)?;
    tracing::info!(input = %input.display(), bytes = buf.len(), "read input");
    let report = carve(&buf, config.policy)
        .with_context(|| format!("Failed to segment {}", input.display()))?;
    Ok((buf, report))
}

/// One-line human summary of a named segment.
pub fn describe_segment(index: usize, named: &NamedSegment) -> String {
    let range = named.segment.range;
    let mut line = format!(
        "[{index}] {:<7} offset={:#08x} len={:<8} {}",
        named.segment.kind.as_str(),
        range.offset,
        range.len,
        named.file_name
    );
    if let Some(label) = &named.label {
        match &label.code {
            Some(code) => line.push_str(&format!(" ({}, {})", label.name, code)),
            None => line.push_str(&format!(" ({})", label.name)),
        }
    }
    line
}
