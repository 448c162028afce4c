//! Shared fixtures for server integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};

use mailgun_exporter_core::error::{ExporterError, Result};
use mailgun_exporter_core::stats::{Accepted, DomainStat, Total};
use mailgun_exporter_server::config::ExporterConfig;
use mailgun_exporter_server::upstream::StatsSource;

pub fn test_config(domains: &[&str]) -> ExporterConfig {
    ExporterConfig {
        domains: domains.iter().map(|d| d.to_string()).collect(),
        api_key: "key-test".into(),
        api_base: "http://127.0.0.1:1/v3".into(),
        listen: "127.0.0.1:0".into(),
        metrics_path: "/metrics".into(),
        request_timeout: Duration::from_millis(200),
        concurrency: 1,
    }
}

pub fn bucket(incoming: u64, outgoing: u64, clicked: u64) -> DomainStat {
    DomainStat {
        accepted: Accepted {
            incoming,
            outgoing,
            total: incoming + outgoing,
        },
        clicked: Total { total: clicked },
        ..Default::default()
    }
}

/// Answers from a fixed table; domains missing from it hang until the
/// collector's timeout fires.
#[derive(Default)]
pub struct StubSource {
    answers: HashMap<String, Result<Vec<DomainStat>>>,
}

impl StubSource {
    pub fn ok(mut self, domain: &str, buckets: Vec<DomainStat>) -> Self {
        self.answers.insert(domain.to_string(), Ok(buckets));
        self
    }

    pub fn fail(mut self, domain: &str, err: ExporterError) -> Self {
        self.answers.insert(domain.to_string(), Err(err));
        self
    }
}

#[async_trait]
impl StatsSource for StubSource {
    async fn fetch(&self, domain: &str, _start: DateTime<Utc>) -> Result<Vec<DomainStat>> {
        match self.answers.get(domain) {
            Some(answer) => answer.clone(),
            None => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
        }
    }
}

pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Sample lines (no comments) of an exposition body.
pub fn sample_lines(body: &str) -> Vec<&str> {
    body.lines().filter(|l| !l.starts_with('#') && !l.is_empty()).collect()
}
