//! Shared application state for the exporter.
//!
//! Built once at startup from the loaded config; read-only afterwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use mailgun_exporter_core::error::Result;

use crate::collector::Collector;
use crate::config::ExporterConfig;
use crate::obs::process::ProcessCollector;
use crate::upstream::{MailgunClient, StatsSource};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ExporterConfig>,
    collector: Arc<Collector>,
    index_html: Arc<str>,
    process: Arc<ProcessCollector>,
    scrapes: Arc<AtomicU64>,
}

impl AppState {
    /// Build state backed by the Mailgun API, anchored at the current time.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let source = Arc::new(MailgunClient::new(&cfg)?);
        Ok(Self::with_source(cfg, source, Utc::now()))
    }

    /// Build state with an explicit stats source and window start.
    pub fn with_source(
        cfg: ExporterConfig,
        source: Arc<dyn StatsSource>,
        scrape_start: DateTime<Utc>,
    ) -> Self {
        let cfg = Arc::new(cfg);
        let collector = Arc::new(Collector::new(Arc::clone(&cfg), source, scrape_start));
        let index_html = index_page(&cfg.metrics_path).into();
        Self {
            cfg,
            collector,
            index_html,
            process: Arc::new(ProcessCollector::new()),
            scrapes: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.cfg
    }

    pub fn collector(&self) -> Arc<Collector> {
        Arc::clone(&self.collector)
    }

    pub fn index_html(&self) -> Arc<str> {
        Arc::clone(&self.index_html)
    }

    pub fn process(&self) -> &ProcessCollector {
        &self.process
    }

    /// Count one served scrape and return the new total.
    pub fn record_scrape(&self) -> u64 {
        self.scrapes.fetch_add(1, Ordering::Relaxed) + 1
    }
}

fn index_page(metrics_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>Mailgun Exporter</title></head>\n\
         <body>\n\
         <h1>Mailgun Exporter</h1>\n\
         <p><a href='{metrics_path}'>Metrics</a></p>\n\
         <p><a href='{health}'>Health</a></p>\n\
         </body>\n\
         </html>\n",
        health = crate::config::HEALTH_PATH,
    )
}
