//! puppet-exporter
//!
//! Serves Puppet agent run report metrics for Prometheus.
//! - `puppet-exporter [config.yaml]` : run the server
//! - `puppet-exporter version`       : print the build version
//! - `puppet-exporter help`          : print usage and the config layout

use std::path::PathBuf;

use tracing_subscriber::{fmt, EnvFilter};

use puppet_exporter_core::ExporterError;
use puppet_exporter_server::config::{self, ExporterConfig, DEFAULT_CONFIG_PATH};
use puppet_exporter_server::{app_state, router, usage, BUILD_VERSION};

#[tokio::main]
async fn main() {
    let arg = std::env::args().nth(1);
    match arg.as_deref() {
        Some("version") => {
            println!("{BUILD_VERSION}");
            return;
        }
        Some("help" | "-h" | "--help") => {
            print!("{}", usage());
            return;
        }
        _ => {}
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let path = PathBuf::from(arg.unwrap_or_else(|| DEFAULT_CONFIG_PATH.into()));
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(ExporterError::NotFound { .. }) => {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            ExporterConfig::default()
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "config load failed");
            std::process::exit(1);
        }
    };

    let listen = cfg.exporter.listen_addr().expect("exporter.listen must be a valid SocketAddr");
    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, version = BUILD_VERSION, "puppet-exporter starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
