#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use mailgun_exporter_core::{DomainAggregate, ExporterError, ScrapeReport, ScrapeResult};

#[test]
fn up_only_when_every_domain_succeeds() {
    let all_up = ScrapeReport::new(vec![
        ScrapeResult::up("a.example.com", DomainAggregate::default()),
        ScrapeResult::up("b.example.com", DomainAggregate::default()),
    ]);
    assert_eq!(all_up.up_value(), 1.0);
    assert_eq!(all_up.failures(), 0);

    let one_down = ScrapeReport::new(vec![
        ScrapeResult::up("a.example.com", DomainAggregate::default()),
        ScrapeResult::down("b.example.com", ExporterError::Timeout(Duration::from_secs(30))),
    ]);
    assert_eq!(one_down.up_value(), 0.0);
    assert_eq!(one_down.failures(), 1);
}

#[test]
fn down_result_has_no_aggregate() {
    let r = ScrapeResult::down(
        "a.example.com",
        ExporterError::Upstream {
            status: 401,
            message: "Forbidden".into(),
        },
    );
    assert!(r.aggregate().is_none());
    assert_eq!(r.state_value(), 0.0);
    assert_eq!(r.error().unwrap().kind().as_str(), "UPSTREAM");
}
