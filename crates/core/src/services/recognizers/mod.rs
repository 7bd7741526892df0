//! Record recognizers.
//!
//! Each recognizer knows how to spot the start of one record shape inside a
//! raw buffer and how far that record extends. The segmenter drives both
//! through the shared [`Recognizer`] trait.

pub mod icns;
pub mod language;

pub use icns::IcnsRecognizer;
pub use language::LanguageRecognizer;

use crate::error::ScanResult;
use crate::model::{ByteRange, SegmentKind};

/// Trait implemented by record recognizers (icon images, language labels).
///
/// Size lookups distinguish two failure modes: `Err` means a record was
/// recognized but is malformed (fatal), `Ok(None)` means there is no usable
/// record at that position.
pub trait Recognizer {
    /// Segment kind produced for records of this shape.
    fn kind(&self) -> SegmentKind;

    /// True iff a record of this kind begins exactly at `pos`.
    ///
    /// Callers must ensure `pos < buf.len()`.
    fn is_record_start(&self, buf: &[u8], pos: usize) -> bool;

    /// Scan forward from `pos` (inclusive) for the next record start.
    fn find_next_record_start(&self, buf: &[u8], pos: usize) -> Option<usize>;

    /// Total byte length of the record starting at `pos`.
    fn find_record_size(&self, buf: &[u8], pos: usize) -> ScanResult<Option<usize>>;

    fn find_record_range(&self, buf: &[u8], pos: usize) -> ScanResult<Option<ByteRange>> {
        Ok(self.find_record_size(buf, pos)?.map(|len| ByteRange::new(pos, len)))
    }

    fn find_next_record_range(&self, buf: &[u8], pos: usize) -> ScanResult<Option<ByteRange>> {
        match self.find_next_record_start(buf, pos) {
            Some(start) => self.find_record_range(buf, start),
            None => Ok(None),
        }
    }
}
