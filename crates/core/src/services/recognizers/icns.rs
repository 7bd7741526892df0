use tracing::trace;

use crate::error::{ScanError, ScanResult};
use crate::model::SegmentKind;
use crate::services::recognizers::Recognizer;

/// Magic bytes opening every icon record.
pub const ICNS_MAGIC: &[u8; 4] = b"icns";

/// Marker plus the big-endian length field.
pub const ICNS_HEADER_LEN: usize = 8;

/// Recognizer for Apple `icns` image records.
///
/// Layout: `"icns"`, a big-endian `u32` total length (measured from the first
/// marker byte, header included), then the payload. Icons usually end with a
/// PNG `IEND` chunk but not always, so the length field is trusted as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcnsRecognizer;

impl IcnsRecognizer {
    fn malformed(offset: usize, reason: String) -> ScanError {
        ScanError::MalformedRecord { kind: "icns", offset, reason }
    }
}

impl Recognizer for IcnsRecognizer {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Icon
    }

    fn is_record_start(&self, buf: &[u8], pos: usize) -> bool {
        buf.get(pos..).is_some_and(|rest| rest.starts_with(ICNS_MAGIC))
    }

    fn find_next_record_start(&self, buf: &[u8], pos: usize) -> Option<usize> {
        let rest = buf.get(pos..)?;
        rest.windows(ICNS_MAGIC.len()).position(|w| w == ICNS_MAGIC).map(|idx| pos + idx)
    }

    fn find_record_size(&self, buf: &[u8], pos: usize) -> ScanResult<Option<usize>> {
        debug_assert!(self.is_record_start(buf, pos));

        let len_field = buf
            .get(pos + ICNS_MAGIC.len()..pos + ICNS_HEADER_LEN)
            .ok_or_else(|| Self::malformed(pos, "length field runs past end of buffer".into()))?;
        let declared = u32::from_be_bytes([len_field[0], len_field[1], len_field[2], len_field[3]])
            as usize;

        if declared < ICNS_HEADER_LEN {
            return Err(Self::malformed(
                pos,
                format!("declared length {declared} is shorter than the header"),
            ));
        }

        let end = pos.checked_add(declared).filter(|end| *end <= buf.len()).ok_or_else(|| {
            Self::malformed(
                pos,
                format!("declared length {declared} runs past buffer end {:#x}", buf.len()),
            )
        })?;

        trace!(offset = pos, end, "icns record");
        Ok(Some(declared))
    }
}
