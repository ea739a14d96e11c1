//! Telemetry endpoint rendering against real report files.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::path::Path;

use axum::extract::State;
use axum::http::{header, StatusCode};

use puppet_exporter_server::app_state::AppState;
use puppet_exporter_server::config;
use puppet_exporter_server::ops;

const SUMMARY: &str = r#"
version:
  config: 1700000000
  puppet: "7.1.0"
resources:
  total: 42
  failed: 0
"#;

fn state_for(dir: &Path, report_key: &str, lock: bool) -> AppState {
    let report = dir.join("report.yaml");
    let mut yaml = format!("puppet:\n  {report_key}: \"{}\"\n", report.display());
    if lock {
        yaml.push_str(&format!("  disabled_lock: \"{}\"\n", dir.join("agent_disabled.lock").display()));
    }
    AppState::new(config::load_from_str(&yaml).unwrap()).unwrap()
}

#[test]
fn summary_report_rendered() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("report.yaml"), SUMMARY).unwrap();
    let state = state_for(dir.path(), "last_run_summary", false);

    let body = state.scrape_and_render();
    assert!(body.contains("# HELP puppet_agent_resources_total The total number of resources being managed\n"));
    assert!(body.contains("# TYPE puppet_agent_resources_total gauge\n"));
    assert!(body.contains("puppet_agent_resources_total 42\n"));
    assert!(body.contains("puppet_agent_resources_failed 0\n"));
    assert!(body.contains("puppet_version=\"7.1.0\""));
    assert!(body.contains("} 1700000000\n"));
    assert!(!body.contains("puppet_agent_disabled"));
    assert!(body.contains("puppet_agent_exporter_scrapes_failed{reason=\"NOT_FOUND\"} 0\n"));
    assert_eq!(state.metrics().scrape_duration.count(), 1);
}

#[test]
fn missing_report_counts_failure_and_keeps_info() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("agent_disabled.lock"), r#"{"disabled_message": "maintenance"}"#).unwrap();
    let state = state_for(dir.path(), "last_run_report", true);

    let body = state.scrape_and_render();
    assert!(body.contains("puppet_agent_disabled{disabled_message=\"maintenance\"} 1\n"));
    assert!(body.contains("puppet_agent_info{"));
    assert!(body.contains("error=\""));
    assert!(body.contains("puppet_version=\"n/a\""));
    assert!(body.contains("puppet_agent_exporter_scrapes_failed{reason=\"NOT_FOUND\"} 1\n"));

    state.scrape_and_render();
    assert_eq!(state.metrics().scrapes_failed.get(&[("reason", "NOT_FOUND")]), 2);
}

#[tokio::test]
async fn metrics_handler_serves_text() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("report.yaml"), "resources: [not, a, map]\n").unwrap();
    let state = state_for(dir.path(), "last_run_summary", false);

    let resp = ops::metrics(State(state.clone())).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "text/plain; version=0.0.4; charset=utf-8"
    );

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("reason=\"PARSE_FAILURE\""));
    assert!(text.contains("puppet_agent_exporter_build_info{"));
}
