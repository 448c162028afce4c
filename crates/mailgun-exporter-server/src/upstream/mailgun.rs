//! Mailgun stats API client (`GET /v3/{domain}/stats/total`).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use mailgun_exporter_core::error::{ExporterError, Result};
use mailgun_exporter_core::stats::{
    decode_stats_page, DomainStat, RESOLUTION_HOUR, STAT_EVENTS,
};
use reqwest::Url;

use super::StatsSource;
use crate::config::ExporterConfig;

/// Basic auth user Mailgun expects alongside the API key.
const API_USER: &str = "api";

/// Error body shape used by the Mailgun API.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

pub struct MailgunClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    timeout: Duration,
}

impl MailgunClient {
    pub fn new(cfg: &ExporterConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mailgun-exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExporterError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self {
            http,
            api_base: cfg.api_base.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.request_timeout,
        })
    }

    /// `{api_base}/{domain}/stats/total`, with the domain percent-encoded as
    /// a single path segment.
    pub fn stats_url(&self, domain: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| ExporterError::Config(format!("invalid API base: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ExporterError::Config("API base cannot carry a path".into()))?
            .pop_if_empty()
            .extend([domain, "stats", "total"]);
        Ok(url)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ExporterError {
        if e.is_timeout() {
            ExporterError::Timeout(self.timeout)
        } else {
            ExporterError::Transport(e.without_url().to_string())
        }
    }
}

/// Query string for one stats call.
pub fn stats_query(start: DateTime<Utc>) -> Vec<(&'static str, String)> {
    let mut q: Vec<(&'static str, String)> = STAT_EVENTS
        .iter()
        .map(|e| ("event", (*e).to_string()))
        .collect();
    q.push(("start", start.to_rfc2822()));
    q.push(("resolution", RESOLUTION_HOUR.to_string()));
    q
}

#[async_trait]
impl StatsSource for MailgunClient {
    async fn fetch(&self, domain: &str, start: DateTime<Utc>) -> Result<Vec<DomainStat>> {
        let resp = self
            .http
            .get(self.stats_url(domain)?)
            .basic_auth(API_USER, Some(&self.api_key))
            .query(&stats_query(start))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| body.trim().chars().take(200).collect());
            return Err(ExporterError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(decode_stats_page(&body)?.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn client(api_base: &str) -> MailgunClient {
        let cfg = ExporterConfig {
            domains: vec!["mg.example.com".into()],
            api_key: "key-test".into(),
            api_base: api_base.into(),
            listen: "127.0.0.1:0".into(),
            metrics_path: "/metrics".into(),
            request_timeout: Duration::from_secs(1),
            concurrency: 1,
        };
        MailgunClient::new(&cfg).unwrap()
    }

    #[test]
    fn url_appends_domain_to_base_path() {
        let url = client("https://api.eu.mailgun.net/v3")
            .stats_url("mg.example.com")
            .unwrap();
        assert_eq!(url.as_str(), "https://api.eu.mailgun.net/v3/mg.example.com/stats/total");
    }

    #[test]
    fn url_keeps_domain_in_one_segment() {
        let url = client("http://127.0.0.1:8080/v3")
            .stats_url("a/b?c#d")
            .unwrap();
        assert_eq!(url.path(), "/v3/a%2Fb%3Fc%23d/stats/total");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn query_requests_every_category_hourly() {
        let start = Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap();
        let q = stats_query(start);
        let events: Vec<&str> = q
            .iter()
            .filter(|(k, _)| *k == "event")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(events, STAT_EVENTS.to_vec());
        assert!(q.contains(&("resolution", "hour".to_string())));
        assert!(q.contains(&("start", "Wed, 14 Oct 2026 09:00:00 +0000".to_string())));
    }
}
