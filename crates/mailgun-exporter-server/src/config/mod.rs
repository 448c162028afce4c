//! Exporter config loader (environment + startup flags).
//!
//! Secrets and the domain list come from the environment; the HTTP surface
//! and upstream call tuning come from flags. Everything is resolved once at
//! startup.

pub mod schema;

use std::time::Duration;

use mailgun_exporter_core::error::{ExporterError, Result};

pub use schema::{
    parse_domains, parse_listen_address, Args, ExporterConfig, DEFAULT_API_BASE, ENV_API_BASE,
    ENV_API_KEY, ENV_SCRAPE_DOMAINS, HEALTH_PATH,
};

/// Load from flags and the process environment.
pub fn load(args: &Args) -> Result<ExporterConfig> {
    from_sources(args, |key| std::env::var(key).ok())
}

/// Load from flags and an arbitrary environment lookup.
pub fn from_sources<F>(args: &Args, lookup: F) -> Result<ExporterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| -> Result<String> {
        lookup(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ExporterError::Config(format!("required environment variable {key} not defined"))
            })
    };

    let domains = parse_domains(&required(ENV_SCRAPE_DOMAINS)?);
    let api_key = required(ENV_API_KEY)?.trim().to_string();
    let api_base = lookup(ENV_API_BASE)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let cfg = ExporterConfig {
        domains,
        api_key,
        api_base,
        listen: parse_listen_address(&args.listen_address)?,
        metrics_path: args.telemetry_path.clone(),
        request_timeout: Duration::from_secs(args.timeout_secs),
        concurrency: args.concurrency,
    };
    cfg.validate()?;
    Ok(cfg)
}
