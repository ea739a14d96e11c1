use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use puppet_exporter_core::error::{ExporterError, Result};
use puppet_exporter_core::ReportSource;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub puppet: PuppetSection,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            exporter: ExporterSection::default(),
            puppet: PuppetSection::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.exporter.validate()?;
        self.puppet.validate()?;

        Ok(())
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_telemetry_path")]
    pub telemetry_path: String,

    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            telemetry_path: default_telemetry_path(),
            namespace: default_namespace(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;

        if !self.telemetry_path.starts_with('/') {
            return Err(ExporterError::InvalidConfig(
                "exporter.telemetry_path must start with '/'".into(),
            ));
        }
        if matches!(self.telemetry_path.as_str(), "/" | "/healthz") {
            return Err(ExporterError::InvalidConfig(format!(
                "exporter.telemetry_path {:?} collides with a built-in route",
                self.telemetry_path
            )));
        }

        let mut chars = self.namespace.chars();
        let valid = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if !valid {
            return Err(ExporterError::InvalidConfig(format!(
                "exporter.namespace {:?} is not a valid metric name prefix",
                self.namespace
            )));
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ExporterError::InvalidConfig(format!(
                "exporter.listen {:?} must be a valid socket address: {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9001".into()
}
fn default_telemetry_path() -> String {
    "/metrics".into()
}
fn default_namespace() -> String {
    "puppet_agent".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PuppetSection {
    #[serde(default = "default_last_run_summary")]
    pub last_run_summary: String,

    /// Takes precedence over `last_run_summary` when non-empty.
    #[serde(default)]
    pub last_run_report: String,

    /// Empty disables the lock check.
    #[serde(default)]
    pub disabled_lock: String,
}

impl Default for PuppetSection {
    fn default() -> Self {
        Self {
            last_run_summary: default_last_run_summary(),
            last_run_report: String::new(),
            disabled_lock: String::new(),
        }
    }
}

impl PuppetSection {
    pub fn validate(&self) -> Result<()> {
        if self.last_run_summary.is_empty() && self.last_run_report.is_empty() {
            return Err(ExporterError::InvalidConfig(
                "one of puppet.last_run_summary or puppet.last_run_report must be set".into(),
            ));
        }
        Ok(())
    }

    pub fn report_source(&self) -> ReportSource {
        ReportSource::select(&self.last_run_report, &self.last_run_summary)
    }

    pub fn disabled_lock_path(&self) -> Option<PathBuf> {
        if self.disabled_lock.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.disabled_lock))
        }
    }
}

fn default_last_run_summary() -> String {
    "/var/lib/puppet/state/last_run_summary.yaml".into()
}
