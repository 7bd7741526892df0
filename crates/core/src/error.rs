use thiserror::Error;

/// Error type for scanning and labeling operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    /// A record header was found but its declared extent does not fit the buffer.
    ///
    /// This is fatal for the whole run; the scan stops at the first one.
    #[error("malformed {kind} record at offset {offset:#x}: {reason}")]
    MalformedRecord { kind: &'static str, offset: usize, reason: String },

    /// There is nothing to segment.
    #[error("input buffer is empty")]
    EmptyInput,

    /// A label segment did not contain a NUL-terminated name.
    ///
    /// Local to one segment; labeling continues with a default file name.
    #[error("label segment at offset {offset:#x} has no terminated name")]
    UnparseableLabel { offset: usize },
}

/// Convenience result type for scanning operations.
pub type ScanResult<T> = Result<T, ScanError>;
