//! Metric catalog and Prometheus text exposition.
//!
//! Mailgun samples are built fresh from each `ScrapeReport`; the only state
//! kept between scrapes is the served-scrapes counter and the process handle.

pub mod metrics;
pub mod process;
