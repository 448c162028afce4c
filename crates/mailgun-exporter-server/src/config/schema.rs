use std::fmt;
use std::time::Duration;

use clap::Parser;
use mailgun_exporter_core::error::{ExporterError, Result};

pub const ENV_SCRAPE_DOMAINS: &str = "SCRAPE_DOMAINS";
pub const ENV_API_KEY: &str = "MG_API_KEY";
pub const ENV_API_BASE: &str = "API_BASE";

pub const DEFAULT_API_BASE: &str = "https://api.mailgun.net/v3";
pub const HEALTH_PATH: &str = "/healthz";

/// Startup flags.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mailgun-exporter",
    about = "Export Mailgun domain statistics as Prometheus metrics",
    version,
    long_about = None
)]
pub struct Args {
    /// Address to listen on for web interface and telemetry
    #[arg(long = "web.listen-address", default_value = ":9616")]
    pub listen_address: String,

    /// Path under which to expose metrics
    #[arg(long = "web.telemetry-path", default_value = "/metrics")]
    pub telemetry_path: String,

    /// Timeout in seconds for each Mailgun API call
    #[arg(long = "mailgun.timeout", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Maximum number of domains fetched at the same time
    #[arg(long = "mailgun.concurrency", default_value_t = 1)]
    pub concurrency: usize,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            listen_address: ":9616".into(),
            telemetry_path: "/metrics".into(),
            timeout_secs: 30,
            concurrency: 1,
        }
    }
}

/// Immutable exporter configuration, fixed for the process lifetime.
#[derive(Clone)]
pub struct ExporterConfig {
    pub domains: Vec<String>,
    pub api_key: String,
    pub api_base: String,
    /// `host:port`, resolved when the listener binds.
    pub listen: String,
    pub metrics_path: String,
    pub request_timeout: Duration,
    pub concurrency: usize,
}

impl fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterConfig")
            .field("domains", &self.domains)
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("listen", &self.listen)
            .field("metrics_path", &self.metrics_path)
            .field("request_timeout", &self.request_timeout)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.domains.is_empty() {
            return Err(ExporterError::Config(format!(
                "{ENV_SCRAPE_DOMAINS} must list at least one domain"
            )));
        }
        if let Some(bad) = self.domains.iter().find(|d| !is_valid_domain(d)) {
            return Err(ExporterError::Config(format!(
                "{ENV_SCRAPE_DOMAINS} entry {bad:?} is not a valid domain name"
            )));
        }
        if self.api_key.is_empty() {
            return Err(ExporterError::Config(format!("{ENV_API_KEY} must not be empty")));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ExporterError::Config(format!(
                "{ENV_API_BASE} must be an http(s) URL, got {:?}",
                self.api_base
            )));
        }
        if !self.metrics_path.starts_with('/') {
            return Err(ExporterError::Config("web.telemetry-path must start with '/'".into()));
        }
        if self.metrics_path.contains([':', '*', '{', '}']) {
            return Err(ExporterError::Config(format!(
                "web.telemetry-path must be a literal path, got {:?}",
                self.metrics_path
            )));
        }
        if self.metrics_path == "/" || self.metrics_path == HEALTH_PATH {
            return Err(ExporterError::Config(format!(
                "web.telemetry-path must not be '/' or '{HEALTH_PATH}'"
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ExporterError::Config("mailgun.timeout must be greater than 0".into()));
        }
        if self.concurrency == 0 {
            return Err(ExporterError::Config("mailgun.concurrency must be at least 1".into()));
        }
        Ok(())
    }
}

/// Split the comma separated domain list. Entries are trimmed, empty entries
/// and repeats are dropped, first occurrence order is kept.
pub fn parse_domains(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for d in raw.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        if !out.iter().any(|seen| seen == d) {
            out.push(d.to_string());
        }
    }
    out
}

/// Rejects characters that would change the request path or query when the
/// domain is placed in a URL path segment.
fn is_valid_domain(d: &str) -> bool {
    !d.chars().any(|c| matches!(c, '/' | '?' | '#' | '%' | '\\') || c.is_whitespace())
}

/// Normalize a listen address to `host:port`. A bare `:port` binds every
/// IPv4 interface. Host names are kept and resolved at bind time.
pub fn parse_listen_address(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let invalid =
        |why: &str| ExporterError::Config(format!("invalid web.listen-address {raw:?}: {why}"));

    let full = match raw.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => raw.to_string(),
    };
    let (host, port) = full.rsplit_once(':').ok_or_else(|| invalid("expected host:port"))?;
    if host.is_empty() {
        return Err(invalid("empty host"));
    }
    if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
        return Err(invalid("IPv6 hosts must be bracketed"));
    }
    port.parse::<u16>().map_err(|e| invalid(&format!("bad port: {e}")))?;
    Ok(full)
}
