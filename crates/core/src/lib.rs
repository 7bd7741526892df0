//! carver-core
//!
//! Core library for carving embedded resources out of keyboard-layout data
//! blobs. A blob is a bare concatenation of `icns` images and language label
//! records with no index; this crate finds the records, tiles the buffer into
//! typed segments and pairs each icon with the label in front of it.
//!
//! Everything here is a pure computation over an in-memory buffer. Reading
//! the input and writing segments to disk are left to frontends (the CLI).

pub mod config;
pub mod error;
pub mod model;
pub mod services;

pub use error::{ScanError, ScanResult};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
