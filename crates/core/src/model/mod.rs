//! Core data model for carved segments.
//!
//! This module contains:
//! - `ByteRange`: an (offset, length) window into the input buffer
//! - `SegmentKind` / `Segment`: a classified, contiguous byte range
//! - `LabelRecord`: the name/code pair parsed out of a label segment
//! - `NamedSegment`: a segment paired with its output file name

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// An (offset, length) window into a buffer.
///
/// Ranges computed against a sub-slice can be re-based onto the parent
/// buffer with [`ByteRange::shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    pub offset: usize,
    pub len: usize,
}

impl ByteRange {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Build a range from `[start, end)`. `end` must not precede `start`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "range end {end} precedes start {start}");
        Self { offset: start, len: end.saturating_sub(start) }
    }

    /// One past the last byte covered.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Borrow the bytes this range covers. Returns `None` when the range
    /// does not fit inside `buf`.
    pub fn slice<'a>(&self, buf: &'a [u8]) -> Option<&'a [u8]> {
        buf.get(self.as_range())
    }

    /// Re-base a range computed on a sub-slice starting at `base`.
    pub fn shift(self, base: usize) -> Self {
        Self { offset: self.offset + base, len: self.len }
    }
}

/// Classification of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// An `icns` image record.
    Icon,
    /// A language label (name + optional code).
    Label,
    /// Bytes no recognizer claimed.
    Unknown,
}

impl SegmentKind {
    /// Upper-case tag used in default output names.
    pub fn tag(self) -> &'static str {
        match self {
            SegmentKind::Icon => "ICNS",
            SegmentKind::Label => "LANG",
            SegmentKind::Unknown => "UNKNOWN",
        }
    }

    /// File extension for extracted segments of this kind.
    pub fn extension(self) -> &'static str {
        match self {
            SegmentKind::Icon => "icns",
            SegmentKind::Label => "txt",
            SegmentKind::Unknown => "dat",
        }
    }

    /// Lower-case name for human-readable listings.
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Icon => "icon",
            SegmentKind::Label => "label",
            SegmentKind::Unknown => "unknown",
        }
    }
}

/// A classified byte range of the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub range: ByteRange,
}

impl Segment {
    pub fn new(kind: SegmentKind, range: ByteRange) -> Self {
        Self { kind, range }
    }

    pub fn icon(range: ByteRange) -> Self {
        Self::new(SegmentKind::Icon, range)
    }

    pub fn label(range: ByteRange) -> Self {
        Self::new(SegmentKind::Label, range)
    }

    pub fn unknown(range: ByteRange) -> Self {
        Self::new(SegmentKind::Unknown, range)
    }

    /// Borrow this segment's bytes out of the buffer it was computed from.
    pub fn bytes<'a>(&self, buf: &'a [u8]) -> Option<&'a [u8]> {
        self.range.slice(buf)
    }
}

/// Name/code pair parsed from a label record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    /// Offset of the name's first byte, relative to the buffer it was read from.
    pub origin: usize,
    /// Human-readable language name (e.g. "English").
    pub name: String,
    /// Optional short code (e.g. "en").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Bytes from `origin` through the last terminator consumed.
    pub size: usize,
}

/// A segment together with the file name it is written under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSegment {
    pub segment: Segment,
    pub file_name: String,
    /// Label borrowed by an icon, or parsed from a label segment itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelRecord>,
}

/// Check that `segments` tile `[0, total_len)` exactly, in order.
///
/// Returns the offset of the first gap or overlap on failure.
pub fn check_coverage(segments: &[Segment], total_len: usize) -> Result<(), usize> {
    let mut cursor = 0usize;
    for segment in segments {
        if segment.range.offset != cursor {
            return Err(cursor);
        }
        cursor = segment.range.end();
    }
    if cursor == total_len {
        Ok(())
    } else {
        Err(cursor)
    }
}
