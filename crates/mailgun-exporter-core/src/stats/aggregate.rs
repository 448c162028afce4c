//! Per-domain sums over one scrape's time buckets.

use super::record::DomainStat;

/// Running sums of every counter the exporter publishes for one domain.
///
/// Built fresh for each scrape. Additions saturate at `u64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainAggregate {
    pub accepted_incoming: u64,
    pub accepted_outgoing: u64,
    pub clicked: u64,
    pub complained: u64,
    pub delivered_http: u64,
    pub delivered_smtp: u64,
    pub failed_permanent_bounce: u64,
    pub failed_permanent_delayed_bounce: u64,
    pub failed_permanent_suppress_bounce: u64,
    pub failed_permanent_suppress_complaint: u64,
    pub failed_permanent_suppress_unsubscribe: u64,
    pub failed_temporary_esp_block: u64,
    pub opened: u64,
    pub stored: u64,
    pub unsubscribed: u64,
}

impl DomainAggregate {
    /// Sum every bucket. An empty slice yields all zeros.
    pub fn from_buckets(buckets: &[DomainStat]) -> Self {
        let mut agg = Self::default();
        for b in buckets {
            agg.accumulate(b);
        }
        agg
    }

    /// Add one bucket to the running sums.
    pub fn accumulate(&mut self, s: &DomainStat) {
        fn add(acc: &mut u64, v: u64) {
            *acc = acc.saturating_add(v);
        }

        add(&mut self.accepted_incoming, s.accepted.incoming);
        add(&mut self.accepted_outgoing, s.accepted.outgoing);
        add(&mut self.clicked, s.clicked.total);
        add(&mut self.complained, s.complained.total);
        add(&mut self.delivered_http, s.delivered.http);
        add(&mut self.delivered_smtp, s.delivered.smtp);

        let p = &s.failed.permanent;
        add(&mut self.failed_permanent_bounce, p.bounce);
        add(&mut self.failed_permanent_delayed_bounce, p.delayed_bounce);
        add(&mut self.failed_permanent_suppress_bounce, p.suppress_bounce);
        add(&mut self.failed_permanent_suppress_complaint, p.suppress_complaint);
        add(&mut self.failed_permanent_suppress_unsubscribe, p.suppress_unsubscribe);
        add(&mut self.failed_temporary_esp_block, s.failed.temporary.esp_block);

        add(&mut self.opened, s.opened.total);
        add(&mut self.stored, s.stored.total);
        add(&mut self.unsubscribed, s.unsubscribed.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::record::Total;

    #[test]
    fn complaints_are_counted_once_per_bucket() {
        let bucket = DomainStat {
            complained: Total { total: 3 },
            ..Default::default()
        };
        let agg = DomainAggregate::from_buckets(&[bucket.clone(), bucket]);
        assert_eq!(agg.complained, 6);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let bucket = DomainStat {
            opened: Total { total: u64::MAX },
            ..Default::default()
        };
        let agg = DomainAggregate::from_buckets(&[bucket.clone(), bucket]);
        assert_eq!(agg.opened, u64::MAX);
    }
}
