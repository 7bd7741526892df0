use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use carver_core::config::CarveConfig;
use carver_core::model::{NamedSegment, SegmentKind};
use tracing::{debug, info};

use crate::commands::{build_manifest, describe_segment, load_and_carve, write_manifest};
use crate::ensure_output_dir;

/// Segments that will be written under `config`.
pub fn planned_segments<'a>(
    segments: &'a [NamedSegment],
    config: &CarveConfig,
) -> Vec<&'a NamedSegment> {
    segments
        .iter()
        .filter(|named| !(config.skip_unknown && named.segment.kind == SegmentKind::Unknown))
        .collect()
}

/// Write each segment's bytes to `output_dir/<file_name>`, in order.
///
/// Stops at the first failed write; files already written are left in place.
pub fn write_segments(
    buf: &[u8],
    segments: &[&NamedSegment],
    output_dir: &Path,
) -> Result<Vec<NamedSegment>> {
    let mut written = Vec::with_capacity(segments.len());
    for named in segments {
        let bytes = named
            .segment
            .bytes(buf)
            .ok_or_else(|| anyhow!("Segment {} lies outside the input buffer", named.file_name))?;
        let path = output_dir.join(&named.file_name);
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write segment file {}", path.display()))?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote segment");
        written.push((*named).clone());
    }
    Ok(written)
}

/// Carve `input` and write every segment into the existing `output_dir`.
pub fn extract_command(
    input: &Path,
    output_dir: &Path,
    config: &CarveConfig,
    dry_run: bool,
) -> Result<()> {
    ensure_output_dir(output_dir)?;
    let (buf, report) = load_and_carve(input, config)?;
    let plan = planned_segments(&report.segments, config);

    if dry_run {
        println!("Would write {} file(s) to {}:", plan.len(), output_dir.display());
        for (index, named) in plan.iter().enumerate() {
            println!("  {}", describe_segment(index, named));
        }
        return Ok(());
    }

    let written = write_segments(&buf, &plan, output_dir)?;
    info!(files = written.len(), output = %output_dir.display(), "extraction finished");

    println!("Extracted {} file(s) to {}:", written.len(), output_dir.display());
    for named in &written {
        println!("  - {}", named.file_name);
    }
    if !report.issues.is_empty() {
        println!("Issues ({}):", report.issues.len());
        for issue in &report.issues {
            println!("  - {issue}");
        }
    }

    if config.write_manifest {
        let manifest = build_manifest(input, &buf, &written)?;
        let path = write_manifest(output_dir, &manifest, config.manifest_format)?;
        println!("Manifest: {}", path.display());
    }

    Ok(())
}
