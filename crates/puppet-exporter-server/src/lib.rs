//! puppet-exporter server library entry.
//!
//! Wires config, the core report collector, self-metrics and the HTTP
//! endpoints together. Consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;

/// Crate version, exposed through `build_info`.
pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Source branch, injected at build time through `GIT_BRANCH`.
pub const BUILD_BRANCH: &str = match option_env!("GIT_BRANCH") {
    Some(b) => b,
    None => "n/a",
};

/// Command-line usage text.
pub fn usage() -> String {
    format!(
        "puppet-exporter - exports Puppet agent run report metrics for Prometheus\n\n\
         Usage:\n\n  \
         puppet-exporter [CONFIG]   serve metrics (default config: {default})\n  \
         puppet-exporter version    print the version\n  \
         puppet-exporter help       print this help\n\n\
         A missing config file falls back to the defaults below.\n\n\
         Config file:\n\n{example}",
        default = config::DEFAULT_CONFIG_PATH,
        example = config::EXAMPLE_CONFIG,
    )
}
