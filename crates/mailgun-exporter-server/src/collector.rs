//! Pull-triggered collection pass.
//!
//! One call to [`Collector::collect`] per scrape of the metrics path: every
//! configured domain is fetched once, bounded by the per-call timeout, and
//! summed into a `DomainAggregate`. A failing domain is reported down and the
//! pass moves on. There is no retry.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};

use mailgun_exporter_core::error::ExporterError;
use mailgun_exporter_core::{DomainAggregate, ScrapeReport, ScrapeResult};

use crate::config::ExporterConfig;
use crate::upstream::StatsSource;

pub struct Collector {
    cfg: Arc<ExporterConfig>,
    source: Arc<dyn StatsSource>,
    scrape_start: DateTime<Utc>,
}

impl Collector {
    /// `scrape_start` anchors every request window and never advances.
    pub fn new(
        cfg: Arc<ExporterConfig>,
        source: Arc<dyn StatsSource>,
        scrape_start: DateTime<Utc>,
    ) -> Self {
        Self {
            cfg,
            source,
            scrape_start,
        }
    }

    pub fn scrape_start(&self) -> DateTime<Utc> {
        self.scrape_start
    }

    /// Scrape every domain. Results keep configured domain order even when
    /// fetches overlap.
    pub async fn collect(&self) -> ScrapeReport {
        let started = Instant::now();

        let pending: Vec<_> = self
            .cfg
            .domains
            .iter()
            .map(|domain| self.scrape_domain(domain))
            .collect();
        let results: Vec<ScrapeResult> = stream::iter(pending)
            .buffered(self.cfg.concurrency.max(1))
            .collect()
            .await;

        let report = ScrapeReport::new(results);
        tracing::debug!(
            domains = report.results.len(),
            failed = report.failures(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scrape finished"
        );
        report
    }

    async fn scrape_domain(&self, domain: &str) -> ScrapeResult {
        let timeout = self.cfg.request_timeout;
        let fetched = tokio::time::timeout(timeout, self.source.fetch(domain, self.scrape_start))
            .await
            .unwrap_or(Err(ExporterError::Timeout(timeout)));

        match fetched {
            Ok(buckets) => {
                tracing::trace!(%domain, buckets = buckets.len(), "domain stats fetched");
                ScrapeResult::up(domain, DomainAggregate::from_buckets(&buckets))
            }
            Err(e) => {
                tracing::warn!(
                    %domain,
                    kind = e.kind().as_str(),
                    error = %e,
                    "domain scrape failed"
                );
                ScrapeResult::down(domain, e)
            }
        }
    }
}
