//! Upstream statistics sources.

pub mod mailgun;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use mailgun_exporter_core::error::Result;
use mailgun_exporter_core::stats::DomainStat;

pub use mailgun::MailgunClient;

/// Something that can return hourly stats buckets for a domain from `start` to now.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self, domain: &str, start: DateTime<Utc>) -> Result<Vec<DomainStat>>;
}
