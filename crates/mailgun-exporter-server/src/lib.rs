//! Mailgun exporter server library.
//!
//! Wires config, the upstream stats client, the collector, and the metric
//! renderer into an axum app. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod collector;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod upstream;
