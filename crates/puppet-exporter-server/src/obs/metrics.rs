//! Prometheus text encoding plus the exporter's own counters.
//!
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. The scrape summary stores microseconds in atomics and renders
//! seconds.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;

use puppet_exporter_core::collector::{fq_name, MetricKind, MetricSink, Sample};
use puppet_exporter_core::ErrorKind;

use crate::{BUILD_BRANCH, BUILD_VERSION};

const SUBSYSTEM: &str = "exporter";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf".into() } else { "-Inf".into() }
    } else {
        v.to_string()
    }
}

fn label_str(labels: &[(String, String)]) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let inner = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{inner}}}")
}

/// Renders samples in Prometheus text exposition format.
///
/// `# HELP` / `# TYPE` headers are written once per consecutive run of
/// samples sharing a name.
#[derive(Default)]
pub struct TextEncoder {
    out: String,
    family: Option<String>,
}

impl TextEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn header(&mut self, name: &str, help: &str, kind: &str) {
        if self.family.as_deref() == Some(name) {
            return;
        }
        let _ = writeln!(self.out, "# HELP {} {}", name, escape_help(help));
        let _ = writeln!(self.out, "# TYPE {} {}", name, kind);
        self.family = Some(name.to_string());
    }

    fn line(&mut self, name: &str, labels: &[(String, String)], value: &str) {
        let _ = writeln!(self.out, "{}{} {}", name, label_str(labels), value);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl MetricSink for TextEncoder {
    fn emit(&mut self, sample: Sample) {
        self.header(&sample.name, &sample.help, sample.kind.as_str());
        self.line(&sample.name, &sample.labels, &format_value(sample.value));
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let key = Self::key(labels);
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for a label set (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&Self::key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum over all label sets.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    fn key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        key
    }

    fn render(&self, name: &str, help: &str, enc: &mut TextEncoder) {
        enc.header(name, help, MetricKind::Counter.as_str());
        let mut rows: Vec<(Vec<(String, String)>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (labels, val) in rows {
            enc.line(name, &labels, &val.to_string());
        }
    }
}

/// Count + sum of observed durations (no quantiles).
#[derive(Default)]
pub struct DurationSummary {
    count: AtomicU64,
    sum_micros: AtomicU64,
}

impl DurationSummary {
    pub fn observe(&self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_micros.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, help: &str, enc: &mut TextEncoder) {
        enc.header(name, help, "summary");
        let sum = self.sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
        enc.line(&format!("{name}_sum"), &[], &format_value(sum));
        enc.line(&format!("{name}_count"), &[], &self.count().to_string());
    }
}

/// Metrics describing the exporter itself.
pub struct ExporterMetrics {
    namespace: String,
    pub scrape_duration: DurationSummary,
    pub scrapes_failed: CounterVec,
}

impl ExporterMetrics {
    /// Failure series start at 0 so they exist before the first failure.
    pub fn new(namespace: impl Into<String>) -> Self {
        let scrapes_failed = CounterVec::default();
        for kind in ErrorKind::REPORT {
            scrapes_failed.add(&[("reason", kind.as_str())], 0);
        }
        Self {
            namespace: namespace.into(),
            scrape_duration: DurationSummary::default(),
            scrapes_failed,
        }
    }

    /// Record one finished scrape.
    pub fn observe_scrape(&self, duration: Duration, failure: Option<ErrorKind>) {
        self.scrape_duration.observe(duration);
        if let Some(kind) = failure {
            self.scrapes_failed.inc(&[("reason", kind.as_str())]);
        }
    }

    /// Append exporter metrics after the report samples.
    pub fn render_into(&self, enc: &mut TextEncoder) {
        let ns = &self.namespace;
        self.scrape_duration.render(
            &fq_name(ns, SUBSYSTEM, "scrape_duration_seconds"),
            "The scrapes durations summary and total count.",
            enc,
        );
        self.scrapes_failed.render(
            &fq_name(ns, SUBSYSTEM, "scrapes_failed"),
            "Failed puppet report scrapes by reason.",
            enc,
        );
        enc.emit(
            Sample::gauge(
                fq_name(ns, SUBSYSTEM, "build_info"),
                "Prometheus puppet agent exporter build info in labels",
                1.0,
            )
            .with_label("branch", BUILD_BRANCH)
            .with_label("version", BUILD_VERSION),
        );
    }
}
