//! Shared error type across puppet-exporter crates.

use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

/// Stable error classification (used in labels and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A configured file is absent.
    NotFound,
    /// A file exists but could not be read.
    ReadFailure,
    /// Content does not match the expected report schema.
    ParseFailure,
    /// A numeric value could not be parsed from its text form.
    MalformedMetric,
    /// Configuration rejected at startup.
    InvalidConfig,
}

impl ErrorKind {
    /// Kinds a report scrape can fail with.
    pub const REPORT: [ErrorKind; 4] = [
        ErrorKind::NotFound,
        ErrorKind::ReadFailure,
        ErrorKind::ParseFailure,
        ErrorKind::MalformedMetric,
    ];

    /// String representation used in metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ReadFailure => "READ_FAILURE",
            ErrorKind::ParseFailure => "PARSE_FAILURE",
            ErrorKind::MalformedMetric => "MALFORMED_METRIC",
            ErrorKind::InvalidConfig => "INVALID_CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("error occurred while trying to read file {path:?}: file does not exist")]
    NotFound { path: PathBuf },

    #[error("error occurred while trying to read file {path:?}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error occurred while trying to parse report file {path:?}: {source}")]
    ParseFailure {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("malformed metric value in tuple {tuple:?}: {source}")]
    MalformedMetric {
        tuple: Vec<String>,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ExporterError {
    /// Map an error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::NotFound { .. } => ErrorKind::NotFound,
            ExporterError::ReadFailure { .. } => ErrorKind::ReadFailure,
            ExporterError::ParseFailure { .. } => ErrorKind::ParseFailure,
            ExporterError::MalformedMetric { .. } => ErrorKind::MalformedMetric,
            ExporterError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}
