//! Exporter config loader (strict parsing).

pub mod schema;

use std::path::Path;

use puppet_exporter_core::error::{ExporterError, Result};
use puppet_exporter_core::reader::read_file;

pub use schema::{ExporterConfig, ExporterSection, PuppetSection};

/// Default config location when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "puppet-exporter.yaml";

/// Annotated config printed by `puppet-exporter help`.
pub const EXAMPLE_CONFIG: &str = r#"version: 1
exporter:
  listen: "0.0.0.0:9001"         # address for the HTTP server
  telemetry_path: "/metrics"     # path serving Prometheus text
  namespace: "puppet_agent"      # prefix of every metric name
puppet:
  last_run_summary: "/var/lib/puppet/state/last_run_summary.yaml"
  last_run_report: ""            # full report, wins over the summary when set
  disabled_lock: ""              # agent_disabled.lock, empty turns the check off
"#;

/// Load and validate a config file. A missing file surfaces as `NotFound`.
pub fn load_from_file(path: &Path) -> Result<ExporterConfig> {
    let raw = read_file(path)?;
    load_from_slice(&raw)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    load_from_slice(s.as_bytes())
}

fn load_from_slice(raw: &[u8]) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_slice(raw)
        .map_err(|e| ExporterError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
