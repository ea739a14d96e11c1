//! Single-shot file reader.
//!
//! Distinguishes a missing file from every other I/O failure so callers can
//! apply fallback semantics. No retries.

use std::fs;
use std::io;
use std::path::Path;

use bytes::Bytes;

use crate::error::{ExporterError, Result};

/// Read the whole file at `path`.
pub fn read_file(path: &Path) -> Result<Bytes> {
    match fs::read(path) {
        Ok(buf) => Ok(Bytes::from(buf)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ExporterError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ExporterError::ReadFailure {
            path: path.to_path_buf(),
            source,
        }),
    }
}
