use tracing::{debug, trace};

use crate::config::SegmentPolicy;
use crate::error::{ScanError, ScanResult};
use crate::model::{check_coverage, ByteRange, Segment, SegmentKind};
use crate::services::recognizers::{IcnsRecognizer, LanguageRecognizer, Recognizer};

/// Partitions a buffer into icon, label and unknown segments.
///
/// Icons are located first since they carry an explicit length. Each gap
/// between icons is then searched once for a single label record.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    policy: SegmentPolicy,
    icons: IcnsRecognizer,
    labels: LanguageRecognizer,
}

impl Segmenter {
    pub fn new(policy: SegmentPolicy) -> Self {
        Self { policy, icons: IcnsRecognizer, labels: LanguageRecognizer }
    }

    /// Segment `buf`. The result tiles `[0, buf.len())` with no gaps.
    pub fn segment(&self, buf: &[u8]) -> ScanResult<Vec<Segment>> {
        if buf.is_empty() {
            return Err(ScanError::EmptyInput);
        }

        let coarse = self.split_icons(buf)?;
        let mut segments = Vec::with_capacity(coarse.len() * 2);
        for segment in coarse {
            match segment.kind {
                SegmentKind::Unknown => self.split_label(buf, segment.range, &mut segments)?,
                _ => segments.push(segment),
            }
        }

        debug_assert_eq!(check_coverage(&segments, buf.len()), Ok(()));
        debug!(bytes = buf.len(), segments = segments.len(), "segmented buffer");
        Ok(segments)
    }

    /// First pass: icon records and the unknown gaps around them.
    fn split_icons(&self, buf: &[u8]) -> ScanResult<Vec<Segment>> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        while let Some(range) = self.icons.find_next_record_range(buf, cursor)? {
            if range.offset > cursor {
                segments.push(Segment::unknown(ByteRange::from_bounds(cursor, range.offset)));
            }
            debug!(offset = range.offset, len = range.len, "found icns record");
            segments.push(Segment::new(self.icons.kind(), range));
            cursor = range.end();
        }

        if cursor < buf.len() {
            segments.push(Segment::unknown(ByteRange::from_bounds(cursor, buf.len())));
        }
        Ok(segments)
    }

    /// Locate the label record inside an unknown block, if any.
    ///
    /// Candidates are the block start and the end of every NUL run; the first
    /// candidate whose leading non-NUL byte is alphanumeric decides. A label
    /// sitting at offset 0 with nothing in front of it is not accepted, the
    /// block stays unknown. The returned range is relative to `block`.
    pub fn find_label_split(&self, block: &[u8]) -> ScanResult<Option<ByteRange>> {
        let mut cursor = 0;
        loop {
            match self.labels.find_next_record_start(block, cursor) {
                Some(0) => return Ok(None),
                Some(start) => return self.labels.find_record_range(block, start),
                None => {
                    // Jump past the offending byte to the next NUL run.
                    let Some(stuck) = block[cursor..].iter().position(|&b| b != 0) else {
                        return Ok(None);
                    };
                    let stuck = cursor + stuck;
                    let Some(nul) = block[stuck..].iter().position(|&b| b == 0) else {
                        return Ok(None);
                    };
                    cursor = stuck + nul;
                }
            }
        }
    }

    /// Second pass: split one unknown block into prefix / label / suffix.
    fn split_label(
        &self,
        buf: &[u8],
        block: ByteRange,
        out: &mut Vec<Segment>,
    ) -> ScanResult<()> {
        let bytes = &buf[block.as_range()];
        let Some(label) = self.find_label_split(bytes)? else {
            out.push(Segment::unknown(block));
            return Ok(());
        };
        let label = label.shift(block.offset);
        let prefix = ByteRange::from_bounds(block.offset, label.offset);

        let padding_only = buf[prefix.as_range()].iter().all(|&b| b == 0);
        if padding_only && !self.policy.preserve_nul_padding {
            trace!(offset = prefix.offset, len = prefix.len, "folding NUL padding into label");
            let padded = ByteRange::from_bounds(prefix.offset, label.end());
            out.push(Segment::new(self.labels.kind(), padded));
        } else {
            if !prefix.is_empty() {
                out.push(Segment::unknown(prefix));
            }
            out.push(Segment::new(self.labels.kind(), label));
        }
        debug!(offset = label.offset, len = label.len, "found label record");

        if label.end() < block.end() {
            out.push(Segment::unknown(ByteRange::from_bounds(label.end(), block.end())));
        }
        Ok(())
    }
}

/// Segment `buf` with the default policy.
pub fn segment(buf: &[u8]) -> ScanResult<Vec<Segment>> {
    Segmenter::default().segment(buf)
}
