//! Report normalizers.
//!
//! Puppet writes two incompatible report schemas:
//! - `last_run_report.yaml` (full): sections carry `[name, title, "value"]` tuples.
//! - `last_run_summary.yaml` (summary): sections map metric name -> number,
//!   with a reserved `version` section holding run metadata.
//!
//! Both fold into [`ParsedReport`]. A normalizer either yields a complete
//! report or an error; partial results are never returned.

pub mod full;
pub mod summary;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// metric name -> value
pub type GaugeValues = BTreeMap<String, f64>;

/// section name -> metrics
pub type Sections = BTreeMap<String, GaugeValues>;

/// Uniform representation of one decoded report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReport {
    pub sections: Sections,
    pub puppet_version: String,
    pub config_timestamp: f64,
    /// Only the full report names its environment.
    pub environment: Option<String>,
}

impl ParsedReport {
    /// Record a measurement. Duplicates overwrite earlier values.
    pub fn set_metric(&mut self, section: &str, name: &str, value: f64) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(name.to_string(), value);
    }

    /// Total number of measurements across sections.
    pub fn len(&self) -> usize {
        self.sections.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Report schema, selected once when the scraper is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Full,
    Summary,
}

impl ReportFormat {
    /// Decode `raw` (read from `path`) according to this schema.
    pub fn parse(self, path: &Path, raw: &[u8]) -> Result<ParsedReport> {
        match self {
            ReportFormat::Full => full::parse(path, raw),
            ReportFormat::Summary => summary::parse(path, raw),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Full => "full",
            ReportFormat::Summary => "summary",
        }
    }
}
