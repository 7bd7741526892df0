//! Scanning services: recognizers, segmentation and labeling.

pub mod labeler;
pub mod recognizers;
pub mod segmenter;

pub use labeler::{label_segments, LabelingReport};
pub use segmenter::Segmenter;

use crate::config::SegmentPolicy;
use crate::error::ScanResult;

/// Segment `buf` under `policy` and name the resulting segments.
pub fn carve(buf: &[u8], policy: SegmentPolicy) -> ScanResult<LabelingReport> {
    let segments = Segmenter::new(policy).segment(buf)?;
    Ok(label_segments(buf, &segments))
}
