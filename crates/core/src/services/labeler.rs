use tracing::{debug, warn};

use crate::error::ScanError;
use crate::model::{LabelRecord, NamedSegment, Segment, SegmentKind};
use crate::services::recognizers::LanguageRecognizer;

/// Output of [`label_segments`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelingReport {
    /// One entry per input segment, same order.
    pub segments: Vec<NamedSegment>,
    /// Label segments that could not be parsed. These do not stop labeling.
    pub issues: Vec<ScanError>,
}

/// Accumulator threaded through the pairing fold.
#[derive(Debug, Default)]
struct PairingState {
    report: LabelingReport,
    pending: Option<LabelRecord>,
}

impl PairingState {
    fn step(mut self, buf: &[u8], index: usize, width: usize, segment: Segment) -> Self {
        let (file_name, label) = match segment.kind {
            SegmentKind::Label => {
                let parsed = parse_label(buf, segment);
                match &parsed {
                    Some(record) => {
                        debug!(name = %record.name, code = ?record.code, "pending label")
                    }
                    None => {
                        let offset = segment.range.offset;
                        warn!(offset, "label segment has no terminated name; using default name");
                        self.report.issues.push(ScanError::UnparseableLabel { offset });
                    }
                }
                // Replaces whatever was pending; unused labels are dropped.
                self.pending = parsed.clone();
                (default_file_name(index, width, segment.kind), parsed)
            }
            SegmentKind::Icon => match self.pending.take() {
                Some(record) => (paired_file_name(index, width, &record), Some(record)),
                None => (default_file_name(index, width, segment.kind), None),
            },
            SegmentKind::Unknown => (default_file_name(index, width, segment.kind), None),
        };

        self.report.segments.push(NamedSegment { segment, file_name, label });
        self
    }
}

/// Parse a label segment, skipping any leading NUL padding folded into it.
///
/// The returned record's `origin` is an absolute buffer offset.
fn parse_label(buf: &[u8], segment: Segment) -> Option<LabelRecord> {
    let bytes = segment.bytes(buf)?;
    let mut record = LanguageRecognizer.read_next_record(bytes, 0)?;
    record.origin += segment.range.offset;
    Some(record)
}

/// Name each segment and pair every label with the icon that follows it.
///
/// Only the most recent label is remembered. Icons without a pending label
/// and all other segments get `<index>-<KIND>.<ext>`.
pub fn label_segments(buf: &[u8], segments: &[Segment]) -> LabelingReport {
    let width = index_width(segments.len());
    segments
        .iter()
        .enumerate()
        .fold(PairingState::default(), |state, (index, segment)| {
            state.step(buf, index, width, *segment)
        })
        .report
}

/// Digit width of the largest index for `count` segments (at least 1).
pub fn index_width(count: usize) -> usize {
    count.saturating_sub(1).to_string().len()
}

pub fn default_file_name(index: usize, width: usize, kind: SegmentKind) -> String {
    format!("{index:0width$}-{}.{}", kind.tag(), kind.extension())
}

/// `<index>-<name> (<code>).icns`, or `<index>-<name>.icns` without a code.
pub fn paired_file_name(index: usize, width: usize, label: &LabelRecord) -> String {
    let name = sanitize_file_component(&label.name);
    match &label.code {
        Some(code) => format!(
            "{index:0width$}-{name} ({}).{}",
            sanitize_file_component(code),
            SegmentKind::Icon.extension()
        ),
        None => format!("{index:0width$}-{name}.{}", SegmentKind::Icon.extension()),
    }
}

/// Replace path separators and control characters so a label cannot escape
/// the output directory.
pub fn sanitize_file_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') || c.is_control() { '_' } else { c })
        .collect()
}
