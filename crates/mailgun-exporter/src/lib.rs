//! Top-level facade crate for the Mailgun exporter.
//!
//! Re-exports the core model and the server library so users can depend on a single crate.

pub mod core {
    pub use mailgun_exporter_core::*;
}

pub mod server {
    pub use mailgun_exporter_server::*;
}
