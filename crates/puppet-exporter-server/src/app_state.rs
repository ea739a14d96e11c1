//! Shared application state for the exporter.
//!
//! Holds the immutable config, the report collector and the exporter's own
//! metrics. Cloned into every axum handler.

use std::sync::Arc;
use std::time::Instant;

use puppet_exporter_core::collector::Collector;
use puppet_exporter_core::error::Result;
use puppet_exporter_core::ReportScraper;

use crate::config::ExporterConfig;
use crate::obs::{ExporterMetrics, TextEncoder};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    collector: Arc<dyn Collector>,
    metrics: ExporterMetrics,
}

impl AppState {
    /// Build application state from a validated config.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        cfg.validate()?;

        let source = cfg.puppet.report_source();
        let lock = cfg.puppet.disabled_lock_path();
        tracing::info!(
            report = %source.path().display(),
            format = source.format().as_str(),
            disabled_lock = ?lock,
            namespace = %cfg.exporter.namespace,
            "report scraper configured"
        );

        let scraper = ReportScraper::new(cfg.exporter.namespace.clone(), source, lock);
        Ok(Self::with_collector(cfg, Arc::new(scraper)))
    }

    /// Build state around an arbitrary collector.
    pub fn with_collector(cfg: ExporterConfig, collector: Arc<dyn Collector>) -> Self {
        let metrics = ExporterMetrics::new(cfg.exporter.namespace.clone());
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                collector,
                metrics,
            }),
        }
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.inner.metrics
    }

    /// Run one collection cycle and render the full exposition body.
    ///
    /// Blocking: reads report files from disk.
    pub fn scrape_and_render(&self) -> String {
        let mut enc = TextEncoder::new();

        let started = Instant::now();
        let res = self.inner.collector.collect(&mut enc);
        let elapsed = started.elapsed();

        let failure = res.as_ref().err().map(|e| e.kind());
        if let Err(e) = &res {
            tracing::debug!(error = %e, "scrape completed with error");
        }
        self.inner.metrics.observe_scrape(elapsed, failure);
        self.inner.metrics.render_into(&mut enc);

        enc.finish()
    }
}
