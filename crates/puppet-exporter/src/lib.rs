//! Top-level facade crate for puppet-exporter.
//!
//! Re-exports the core report collector and the server library so users can depend on a single crate.

pub mod core {
    pub use puppet_exporter_core::*;
}

pub mod server {
    pub use puppet_exporter_server::*;
}
