//! Mailgun exporter core: upstream statistics model, per-domain aggregation,
//! and the error surface shared by the server.
//!
//! This crate carries no transport or runtime dependencies so the model and
//! summation can be tested without an HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ExporterError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod scrape;
pub mod stats;

/// Shared result type.
pub use error::{ErrorKind, ExporterError, Result};
pub use scrape::{ScrapeOutcome, ScrapeReport, ScrapeResult};
pub use stats::{DomainAggregate, DomainStat, StatsPage};
