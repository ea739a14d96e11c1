//! puppet-exporter core: report readers, normalizers and the snapshot builder.
//!
//! This crate turns a Puppet agent's locally written run report (either the
//! full `last_run_report.yaml` or the `last_run_summary.yaml`) into a flat set
//! of gauges plus an informational record. It carries no HTTP or runtime
//! dependencies; the server crate renders what [`collector::Collector`] emits.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. A missing or broken
//! report must never take the exporter down, so every fallible path surfaces
//! as [`ExporterError`] and is folded into the scrape [`snapshot::Snapshot`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod collector;
pub mod describe;
pub mod error;
pub mod lock;
pub mod reader;
pub mod report;
pub mod snapshot;

/// Shared result type.
pub use error::{ErrorKind, ExporterError, Result};
pub use snapshot::{ReportScraper, ReportSource, Snapshot};
