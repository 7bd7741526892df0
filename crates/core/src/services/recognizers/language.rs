use tracing::trace;

use crate::error::ScanResult;
use crate::model::{LabelRecord, SegmentKind};
use crate::services::recognizers::Recognizer;

/// Recognizer for language label records.
///
/// Layout: a NUL-terminated name whose first byte is ASCII alphanumeric, any
/// number of NUL padding bytes, then an optional NUL-terminated code:
///
/// ```text
/// E n g l i s h \0 \0 \0 e n \0
/// ```
///
/// There is no magic number, so any alphanumeric byte looks like a record
/// start. Callers narrow the search (see the segmenter) to keep false
/// positives down.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageRecognizer;

/// Bytes of a NUL-terminated run starting at `pos`, terminator excluded.
fn read_cstring(buf: &[u8], pos: usize) -> Option<&[u8]> {
    let rest = buf.get(pos..)?;
    rest.iter().position(|&b| b == 0).map(|nul| &rest[..nul])
}

impl LanguageRecognizer {
    /// Parse the label record starting exactly at `pos`.
    ///
    /// Returns `None` if `pos` is not a record start or the name has no
    /// terminator. A missing or unterminated code still yields a name-only
    /// record.
    pub fn read_record(&self, buf: &[u8], pos: usize) -> Option<LabelRecord> {
        if !self.is_record_start(buf, pos) {
            return None;
        }

        let name = read_cstring(buf, pos)?;
        let mut size = name.len() + 1;

        let code = self
            .find_next_record_start(buf, pos + size)
            .and_then(|start| read_cstring(buf, start).map(|code| (start, code)));
        if let Some((start, code)) = code {
            size = start + code.len() + 1 - pos;
        }

        Some(LabelRecord {
            origin: pos,
            name: String::from_utf8_lossy(name).into_owned(),
            code: code.map(|(_, code)| String::from_utf8_lossy(code).into_owned()),
            size,
        })
    }

    /// Skip leading NUL padding from `pos`, then parse.
    pub fn read_next_record(&self, buf: &[u8], pos: usize) -> Option<LabelRecord> {
        let start = self.find_next_record_start(buf, pos)?;
        self.read_record(buf, start)
    }

    /// Recompute the record span from raw terminator positions.
    ///
    /// Unlike [`read_record`](Self::read_record) this requires a code field,
    /// so name-only records yield `None`. When it does return a size, that size
    /// equals the parsed one; [`read_record`](Self::read_record) stays the
    /// source of truth.
    pub fn estimate_record_size(&self, buf: &[u8], pos: usize) -> Option<usize> {
        let name_end = pos + read_cstring(buf, pos)?.len();
        let code_start = self.find_next_record_start(buf, name_end)?;
        let code_end = code_start + read_cstring(buf, code_start)?.len() + 1;
        (code_end <= buf.len()).then(|| code_end - pos)
    }
}

impl Recognizer for LanguageRecognizer {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Label
    }

    fn is_record_start(&self, buf: &[u8], pos: usize) -> bool {
        buf.get(pos).is_some_and(|b| b.is_ascii_alphanumeric())
    }

    /// Skips NUL padding only. A non-NUL, non-alphanumeric byte ends the
    /// search, as does running off the end of the buffer.
    fn find_next_record_start(&self, buf: &[u8], pos: usize) -> Option<usize> {
        let rest = buf.get(pos..)?;
        let start = pos + rest.iter().position(|&b| b != 0)?;
        self.is_record_start(buf, start).then_some(start)
    }

    fn find_record_size(&self, buf: &[u8], pos: usize) -> ScanResult<Option<usize>> {
        let Some(record) = self.read_record(buf, pos) else {
            return Ok(None);
        };

        // Both paths stop at the same terminators, so a present estimate always
        // matches; only name-only records leave it empty.
        debug_assert!(self
            .estimate_record_size(buf, pos)
            .map_or(true, |estimate| estimate == record.size));
        trace!(offset = pos, size = record.size, name = %record.name, "label record");

        Ok(Some(record.size))
    }
}
