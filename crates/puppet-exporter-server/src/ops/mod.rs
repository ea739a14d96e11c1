//! Operational HTTP endpoints.
//!
//! - `/`         : landing page
//! - `/healthz`  : liveness
//! - `<telemetry_path>` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let path = &state.cfg().exporter.telemetry_path;
    Html(format!(
        "<html>\n<head><title>Puppet Exporter</title></head>\n<body>\n\
         <h1>Puppet Exporter</h1>\n<p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n</html>\n"
    ))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    // file reads block; keep them off the async workers
    match tokio::task::spawn_blocking(move || state.scrape_and_render()).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "scrape task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "scrape failed").into_response()
        }
    }
}
