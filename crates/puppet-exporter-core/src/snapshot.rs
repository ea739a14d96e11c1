//! Metric snapshot builder.
//!
//! One [`ReportScraper::scrape`] call is one collection cycle:
//! 1) disabled lock (optional, failures stay local)
//! 2) read + normalize the report (all-or-nothing)
//! 3) fill the informational block
//!
//! The scraper holds only immutable configuration; every cycle allocates its
//! own [`Snapshot`], so overlapping scrapes never share an accumulator.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ExporterError;
use crate::lock::{read_disabled_lock, DisabledState};
use crate::reader::read_file;
use crate::report::{ParsedReport, ReportFormat, Sections};

/// Version label value when the report did not provide one.
pub const VERSION_NOT_APPLICABLE: &str = "n/a";

pub const INFO_REPORT_FILENAME: &str = "report_filename";
pub const INFO_DISABLED_LOCK_FILENAME: &str = "disabled_lock_filename";
pub const INFO_ENVIRONMENT: &str = "environment";
pub const INFO_PUPPET_VERSION: &str = "puppet_version";
pub const INFO_ERROR: &str = "error";

/// Output of one collection cycle.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub sections: Sections,
    pub puppet_version: String,
    pub config_timestamp: f64,
    pub info: BTreeMap<String, String>,
    /// Present only when a lock path is configured and could be read.
    pub disabled: Option<DisabledState>,
    /// Lock read failure; never escalated to `error`.
    pub lock_error: Option<ExporterError>,
    /// Report read/parse failure for this cycle.
    pub error: Option<ExporterError>,
}

impl Snapshot {
    pub fn set_info(&mut self, key: &str, value: impl Into<String>) {
        self.info.insert(key.to_string(), value.into());
    }

    /// Version string, `"n/a"` when unknown.
    pub fn puppet_version(&self) -> &str {
        if self.puppet_version.is_empty() {
            VERSION_NOT_APPLICABLE
        } else {
            &self.puppet_version
        }
    }

    /// Informational entries with a non-empty value, sorted by key.
    pub fn info_labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.info
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn measurement_count(&self) -> usize {
        self.sections.values().map(|m| m.len()).sum()
    }

    fn apply_report(&mut self, report: ParsedReport) {
        self.sections = report.sections;
        self.puppet_version = report.puppet_version;
        self.config_timestamp = report.config_timestamp;
        if let Some(env) = report.environment {
            self.set_info(INFO_ENVIRONMENT, env);
        }
    }
}

/// Which report file to read, and therefore which schema to expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    Full(PathBuf),
    Summary(PathBuf),
}

impl ReportSource {
    /// The full report wins when its path is set.
    pub fn select(full: impl Into<PathBuf>, summary: impl Into<PathBuf>) -> Self {
        let full = full.into();
        if full.as_os_str().is_empty() {
            ReportSource::Summary(summary.into())
        } else {
            ReportSource::Full(full)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ReportSource::Full(p) | ReportSource::Summary(p) => p,
        }
    }

    pub fn format(&self) -> ReportFormat {
        match self {
            ReportSource::Full(_) => ReportFormat::Full,
            ReportSource::Summary(_) => ReportFormat::Summary,
        }
    }
}

/// Builds a [`Snapshot`] per collection cycle.
#[derive(Debug, Clone)]
pub struct ReportScraper {
    namespace: String,
    source: ReportSource,
    disabled_lock: Option<PathBuf>,
}

impl ReportScraper {
    /// An empty lock path disables the lock check.
    pub fn new(
        namespace: impl Into<String>,
        source: ReportSource,
        disabled_lock: Option<PathBuf>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            source,
            disabled_lock: disabled_lock.filter(|p| !p.as_os_str().is_empty()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn source(&self) -> &ReportSource {
        &self.source
    }

    pub fn disabled_lock(&self) -> Option<&Path> {
        self.disabled_lock.as_deref()
    }

    /// Run one collection cycle. Never fails; errors land in the snapshot.
    pub fn scrape(&self) -> Snapshot {
        let mut snap = Snapshot::default();
        let report_path = self.source.path();
        snap.set_info(INFO_REPORT_FILENAME, report_path.display().to_string());

        if let Some(lock) = &self.disabled_lock {
            snap.set_info(INFO_DISABLED_LOCK_FILENAME, lock.display().to_string());
            match read_disabled_lock(lock) {
                Ok(state) => snap.disabled = Some(state),
                Err(e) => {
                    tracing::warn!(path = %lock.display(), error = %e, "disabled lock check failed");
                    snap.lock_error = Some(e);
                }
            }
        }

        let format = self.source.format();
        match read_file(report_path).and_then(|raw| format.parse(report_path, &raw)) {
            Ok(report) => {
                tracing::debug!(
                    format = format.as_str(),
                    measurements = report.len(),
                    "report parsed"
                );
                snap.apply_report(report);
            }
            Err(e) => {
                tracing::warn!(format = format.as_str(), kind = e.kind().as_str(), error = %e, "report scrape failed");
                snap.set_info(INFO_ERROR, e.to_string());
                snap.error = Some(e);
            }
        }

        let version = snap.puppet_version().to_string();
        snap.set_info(INFO_PUPPET_VERSION, version);
        snap
    }
}
