//! Outcome of one collection pass.

use crate::error::ExporterError;
use crate::stats::DomainAggregate;

/// Per-domain result: totals when the upstream answered, the error otherwise.
#[derive(Debug, Clone)]
pub enum ScrapeOutcome {
    Up(DomainAggregate),
    Down(ExporterError),
}

#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub domain: String,
    pub outcome: ScrapeOutcome,
}

impl ScrapeResult {
    pub fn up(domain: impl Into<String>, agg: DomainAggregate) -> Self {
        Self {
            domain: domain.into(),
            outcome: ScrapeOutcome::Up(agg),
        }
    }

    pub fn down(domain: impl Into<String>, err: ExporterError) -> Self {
        Self {
            domain: domain.into(),
            outcome: ScrapeOutcome::Down(err),
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self.outcome, ScrapeOutcome::Up(_))
    }

    pub fn aggregate(&self) -> Option<&DomainAggregate> {
        match &self.outcome {
            ScrapeOutcome::Up(agg) => Some(agg),
            ScrapeOutcome::Down(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ExporterError> {
        match &self.outcome {
            ScrapeOutcome::Up(_) => None,
            ScrapeOutcome::Down(e) => Some(e),
        }
    }

    /// Value of the `domain_state` gauge: 1 active, 0 scrape failure.
    pub fn state_value(&self) -> f64 {
        if self.is_up() {
            1.0
        } else {
            0.0
        }
    }
}

/// All domain results of one scrape, in configured domain order.
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    pub results: Vec<ScrapeResult>,
}

impl ScrapeReport {
    pub fn new(results: Vec<ScrapeResult>) -> Self {
        Self { results }
    }

    /// Number of domains that failed this scrape.
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.is_up()).count()
    }

    /// Value of the `up` gauge: 1 only if every domain succeeded.
    pub fn up_value(&self) -> f64 {
        if self.failures() == 0 {
            1.0
        } else {
            0.0
        }
    }
}
