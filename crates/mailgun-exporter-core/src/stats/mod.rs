//! Mailgun statistics model.
//!
//! - `record`: one time bucket as returned by `/v3/{domain}/stats/total`.
//! - `aggregate`: per-domain sums across all buckets of a single scrape.
//!
//! Decoding is panic-free: a malformed body is reported as
//! `ExporterError::Decode` and the domain is marked down for that scrape.

pub mod aggregate;
pub mod record;

pub use aggregate::DomainAggregate;
pub use record::{
    decode_stats_page, Accepted, Delivered, DomainStat, Failed, PermanentFailures, StatsPage,
    TemporaryFailures, Total,
};

/// Event categories requested from the stats endpoint, in request order.
pub const STAT_EVENTS: [&str; 8] = [
    "accepted",
    "clicked",
    "complained",
    "delivered",
    "failed",
    "opened",
    "stored",
    "unsubscribed",
];

/// Resolution requested for every stats call.
pub const RESOLUTION_HOUR: &str = "hour";
