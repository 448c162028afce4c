//! Upstream stats wire types (JSON).
//!
//! Every category and counter defaults to zero so a bucket that omits a
//! category contributes nothing to the sums. Unknown fields are ignored: the
//! upstream adds categories over time and that must not take a domain down.

use serde::Deserialize;

use crate::error::{ExporterError, Result};

/// Response envelope of the stats endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsPage {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    /// Time buckets, oldest first.
    #[serde(default)]
    pub stats: Vec<DomainStat>,
}

/// One time bucket of statistics for a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DomainStat {
    /// Bucket start as reported by the upstream (RFC 2822).
    pub time: Option<String>,
    pub accepted: Accepted,
    pub clicked: Total,
    pub complained: Total,
    pub delivered: Delivered,
    pub failed: Failed,
    pub opened: Total,
    pub stored: Total,
    pub unsubscribed: Total,
}

/// Category that only carries a total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Total {
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Accepted {
    pub incoming: u64,
    pub outgoing: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Delivered {
    pub http: u64,
    pub smtp: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Failed {
    pub permanent: PermanentFailures,
    pub temporary: TemporaryFailures,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PermanentFailures {
    pub bounce: u64,
    #[serde(rename = "delayed-bounce")]
    pub delayed_bounce: u64,
    #[serde(rename = "suppress-bounce")]
    pub suppress_bounce: u64,
    #[serde(rename = "suppress-complaint")]
    pub suppress_complaint: u64,
    #[serde(rename = "suppress-unsubscribe")]
    pub suppress_unsubscribe: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemporaryFailures {
    #[serde(rename = "espblock")]
    pub esp_block: u64,
}

/// Decode a stats response body.
pub fn decode_stats_page(body: &str) -> Result<StatsPage> {
    serde_json::from_str(body)
        .map_err(|e| ExporterError::Decode(format!("invalid stats body: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_map_to_fields() {
        let body = r#"{"stats":[{"failed":{
            "permanent":{"delayed-bounce":4,"suppress-unsubscribe":2},
            "temporary":{"espblock":9}
        }}]}"#;
        let page = decode_stats_page(body).unwrap();
        let f = page.stats[0].failed;
        assert_eq!(f.permanent.delayed_bounce, 4);
        assert_eq!(f.permanent.suppress_unsubscribe, 2);
        assert_eq!(f.temporary.esp_block, 9);
    }

    #[test]
    fn negative_count_is_a_decode_error() {
        let err = decode_stats_page(r#"{"stats":[{"clicked":{"total":-1}}]}"#).unwrap_err();
        assert_eq!(err.kind().as_str(), "DECODE");
    }
}
