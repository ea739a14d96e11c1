#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::Path;

use puppet_exporter_core::{ErrorKind, ReportSource};
use puppet_exporter_server::{config, usage};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
puppet:
  last_run_sumary: "/tmp/summary.yaml" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "INVALID_CONFIG");
}

#[test]
fn empty_config_uses_defaults() {
    let cfg = config::load_from_str("{}").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.exporter.listen, "0.0.0.0:9001");
    assert_eq!(cfg.exporter.telemetry_path, "/metrics");
    assert_eq!(cfg.exporter.namespace, "puppet_agent");
    assert_eq!(
        cfg.puppet.report_source(),
        ReportSource::Summary("/var/lib/puppet/state/last_run_summary.yaml".into())
    );
    assert!(cfg.puppet.disabled_lock_path().is_none());
}

#[test]
fn full_report_wins_over_summary() {
    let ok = r#"
version: 1
puppet:
  last_run_report: "/opt/puppetlabs/puppet/cache/state/last_run_report.yaml"
  disabled_lock: "/opt/puppetlabs/puppet/cache/state/agent_disabled.lock"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(
        cfg.puppet.report_source(),
        ReportSource::Full("/opt/puppetlabs/puppet/cache/state/last_run_report.yaml".into())
    );
    assert_eq!(
        cfg.puppet.disabled_lock_path().unwrap(),
        Path::new("/opt/puppetlabs/puppet/cache/state/agent_disabled.lock")
    );
}

#[test]
fn invalid_values_rejected() {
    let cases = [
        "version: 2\n",
        "exporter:\n  listen: \":9001\"\n",
        "exporter:\n  telemetry_path: \"metrics\"\n",
        "exporter:\n  telemetry_path: \"/healthz\"\n",
        "exporter:\n  namespace: \"9lives\"\n",
        "exporter:\n  namespace: \"puppet-agent\"\n",
        "puppet:\n  last_run_summary: \"\"\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.kind(), ErrorKind::InvalidConfig, "case={case}");
    }
}

#[test]
fn missing_config_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = config::load_from_file(&dir.path().join("puppet-exporter.yaml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn help_example_config_is_valid() {
    let cfg = config::load_from_str(config::EXAMPLE_CONFIG).expect("example must parse");
    assert_eq!(cfg.exporter.namespace, "puppet_agent");
    assert!(cfg.puppet.disabled_lock_path().is_none());

    let text = usage();
    assert!(text.contains("puppet-exporter help"));
    assert!(text.contains(config::DEFAULT_CONFIG_PATH));
    assert!(text.contains(config::EXAMPLE_CONFIG));
}
