//! Full report (`last_run_report.yaml`).
//!
//! ```yaml
//! puppet_version: "7.1.0"
//! configuration_version: 1700000000
//! environment: production
//! metrics:
//!   resources:
//!     name: resources
//!     label: Resources
//!     values:
//!       - [total, Total, 42]
//! ```
//!
//! Parsing rules:
//! - Tuple values are read as text and parsed as `f64`.
//! - One malformed value fails the whole report (`MalformedMetric`).
//! - Structural mismatches fail with `ParseFailure`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use super::ParsedReport;
use crate::error::{ExporterError, Result};

#[derive(Debug, Deserialize)]
struct FullReport {
    metrics: BTreeMap<String, FullReportSection>,
    #[serde(default)]
    puppet_version: Option<String>,
    #[serde(default)]
    configuration_version: Option<f64>,
    #[serde(default)]
    environment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FullReportSection {
    #[serde(default)]
    values: Vec<ValueTuple>,
}

/// `[name, title, value]`
#[derive(Debug, Deserialize)]
#[serde(try_from = "Vec<Value>")]
struct ValueTuple {
    name: String,
    title: String,
    value: String,
}

impl TryFrom<Vec<Value>> for ValueTuple {
    type Error = String;

    fn try_from(items: Vec<Value>) -> std::result::Result<Self, Self::Error> {
        let [name, title, value]: [Value; 3] = items
            .try_into()
            .map_err(|v: Vec<Value>| format!("expected 3-element value tuple, got {}", v.len()))?;

        Ok(Self {
            name: scalar_text(name)?,
            title: scalar_text(title)?,
            value: scalar_text(value)?,
        })
    }
}

/// Text form of a YAML scalar.
fn scalar_text(v: Value) -> std::result::Result<String, String> {
    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => match n.as_f64() {
            // serde_yaml prints these as `.inf` / `.nan`
            Some(f) if !f.is_finite() => Ok(f.to_string()),
            _ => Ok(n.to_string()),
        },
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(format!("expected scalar in value tuple, got {other:?}")),
    }
}

impl ValueTuple {
    fn parse_value(&self) -> Result<f64> {
        self.value
            .trim()
            .parse::<f64>()
            .map_err(|source| ExporterError::MalformedMetric {
                tuple: vec![self.name.clone(), self.title.clone(), self.value.clone()],
                source,
            })
    }
}

/// Decode a full report.
pub fn parse(path: &Path, raw: &[u8]) -> Result<ParsedReport> {
    let report: FullReport =
        serde_yaml::from_slice(raw).map_err(|source| ExporterError::ParseFailure {
            path: path.to_path_buf(),
            source,
        })?;

    let mut out = ParsedReport {
        puppet_version: report.puppet_version.unwrap_or_default(),
        config_timestamp: report.configuration_version.unwrap_or_default(),
        environment: report.environment,
        ..ParsedReport::default()
    };

    for (section, body) in &report.metrics {
        for tuple in &body.values {
            let value = tuple.parse_value()?;
            tracing::trace!(%section, metric = %tuple.name, title = %tuple.title, value, "full report value");
            out.set_metric(section, &tuple.name, value);
        }
    }

    Ok(out)
}
