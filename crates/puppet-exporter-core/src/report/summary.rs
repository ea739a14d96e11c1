//! Summary report (`last_run_summary.yaml`).
//!
//! Decoded in two passes: the reserved `version` section first, then every
//! other top-level key as `metric -> number`. Repeated keys keep the last
//! value, both for metrics and for whole sections.

use std::fmt;
use std::path::Path;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use super::{GaugeValues, ParsedReport, Sections};
use crate::error::{ExporterError, Result};

/// Reserved section carrying run metadata.
pub const VERSION_SECTION: &str = "version";

#[derive(Debug, Default, Deserialize)]
struct SummaryHead {
    #[serde(default)]
    version: VersionSection,
}

#[derive(Debug, Default, Deserialize)]
struct VersionSection {
    #[serde(default)]
    puppet: Option<String>,
    #[serde(default)]
    config: Option<f64>,
}

/// Every top-level section except `version`.
struct SummarySections(Sections);

impl<'de> Deserialize<'de> for SummarySections {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SectionsVisitor)
    }
}

struct SectionsVisitor;

impl<'de> Visitor<'de> for SectionsVisitor {
    type Value = SummarySections;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of section name to metrics")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut sections = Sections::new();
        while let Some(name) = map.next_key::<String>()? {
            if name == VERSION_SECTION {
                map.next_value::<IgnoredAny>()?;
                continue;
            }
            // decoded straight into the map so duplicate keys overwrite
            let metrics: GaugeValues = map.next_value()?;
            sections.entry(name).or_default().extend(metrics);
        }
        Ok(SummarySections(sections))
    }
}

/// Decode a summary report.
pub fn parse(path: &Path, raw: &[u8]) -> Result<ParsedReport> {
    let parse_err = |source| ExporterError::ParseFailure {
        path: path.to_path_buf(),
        source,
    };

    let head: SummaryHead = serde_yaml::from_slice(raw).map_err(parse_err)?;
    let SummarySections(sections): SummarySections = serde_yaml::from_slice(raw).map_err(parse_err)?;

    Ok(ParsedReport {
        sections,
        puppet_version: head.version.puppet.unwrap_or_default(),
        config_timestamp: head.version.config.unwrap_or_default(),
        environment: None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse_str(s: &str) -> Result<ParsedReport> {
        parse(Path::new("last_run_summary.yaml"), s.as_bytes())
    }

    #[test]
    fn version_is_metadata_only() {
        let r = parse_str(
            r#"{"version": {"puppet": "7.1.0", "config": 1700000000}, "resources": {"total": 42, "failed": 0}}"#,
        )
        .unwrap();
        assert_eq!(r.puppet_version, "7.1.0");
        assert_eq!(r.config_timestamp, 1_700_000_000.0);
        assert!(!r.sections.contains_key(VERSION_SECTION));
        assert_eq!(r.len(), 2);
        assert_eq!(r.sections["resources"]["total"], 42.0);
        assert_eq!(r.sections["resources"]["failed"], 0.0);
        assert!(r.environment.is_none());
    }

    #[test]
    fn missing_version_defaults() {
        let r = parse_str("events:\n  total: 3\n").unwrap();
        assert_eq!(r.puppet_version, "");
        assert_eq!(r.config_timestamp, 0.0);
        assert_eq!(r.sections["events"]["total"], 3.0);
    }

    #[test]
    fn non_numeric_section_is_parse_failure() {
        let err = parse_str("resources:\n  total: lots\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let r = parse_str(
            "version:\n  puppet: 7.1.0\n  config: 1\nresources:\n  total: 1\n  failed: 2\n  total: 7\nresources:\n  failed: 3\n",
        )
        .unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.sections["resources"]["total"], 7.0);
        assert_eq!(r.sections["resources"]["failed"], 3.0);
    }

    #[test]
    fn scalar_top_level_is_parse_failure() {
        let err = parse_str("just a string\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }
}
