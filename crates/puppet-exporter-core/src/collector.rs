//! Pull-based collection contract.
//!
//! A [`Collector`] emits [`Sample`]s into a caller-provided [`MetricSink`] and
//! returns the cycle error (if any) so the caller can count failures. The
//! sink always receives a well-formed set: failures shrink the measurements,
//! they never suppress the info or disabled records.

use std::collections::HashSet;

use crate::describe::describe;
use crate::error::Result;
use crate::snapshot::{ReportScraper, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

/// One exposed data point.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

impl Sample {
    pub fn gauge(name: String, help: impl Into<String>, value: f64) -> Self {
        Self {
            name,
            help: help.into(),
            kind: MetricKind::Gauge,
            labels: Vec::new(),
            value,
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Destination for collected samples.
pub trait MetricSink {
    fn emit(&mut self, sample: Sample);
}

impl MetricSink for Vec<Sample> {
    fn emit(&mut self, sample: Sample) {
        self.push(sample);
    }
}

/// Something that can be scraped on demand.
pub trait Collector: Send + Sync {
    fn collect(&self, sink: &mut dyn MetricSink) -> Result<()>;
}

/// Join non-empty parts with `_`, mapping characters outside the Prometheus
/// name charset to `_`.
pub fn fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    let mut out = String::new();
    for part in [namespace, subsystem, name] {
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('_');
        }
        out.extend(part.chars().map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == ':' {
                c
            } else {
                '_'
            }
        }));
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Emit every record derivable from `snap`.
///
/// Series names are unique per cycle: `disabled` and `info` are reserved, and
/// when two measurements map to the same sanitized name the first one (in
/// section, then metric order) is kept.
pub fn emit_snapshot(namespace: &str, snap: &Snapshot, sink: &mut dyn MetricSink) {
    let disabled_name = fq_name(namespace, "", "disabled");
    let info_name = fq_name(namespace, "", "info");
    let mut seen: HashSet<String> = HashSet::from([disabled_name.clone(), info_name.clone()]);

    if let Some(state) = &snap.disabled {
        sink.emit(
            Sample::gauge(
                disabled_name,
                "Puppet state of agent disabled lock",
                if state.disabled { 1.0 } else { 0.0 },
            )
            .with_label("disabled_message", state.message.as_str()),
        );
    }

    for (section, metrics) in &snap.sections {
        for (metric, value) in metrics {
            let name = fq_name(namespace, section, metric);
            if !seen.insert(name.clone()) {
                tracing::warn!(%section, %metric, %name, "metric name collides with an emitted series, skipped");
                continue;
            }
            sink.emit(Sample::gauge(
                name,
                describe(section, metric),
                *value,
            ));
        }
    }

    let mut info = Sample::gauge(
        info_name,
        "Puppet configuration info in labels",
        snap.config_timestamp,
    );
    for (k, v) in snap.info_labels() {
        info = info.with_label(k, v);
    }
    sink.emit(info);
}

impl Collector for ReportScraper {
    fn collect(&self, sink: &mut dyn MetricSink) -> Result<()> {
        let mut snap = self.scrape();
        emit_snapshot(self.namespace(), &snap, sink);
        match snap.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
