//! Fixed metric catalog and text exposition renderer.
//!
//! Families render in catalog order with `# HELP` and `# TYPE` lines even when
//! they carry no samples. Within a family, samples follow configured domain
//! order, then the catalog's fixed `type` label order. Labels render in the
//! order the descriptor declares them. The exporter's own families follow the
//! Mailgun catalog.

use std::fmt::Write;

use mailgun_exporter_core::{DomainAggregate, ScrapeReport};

use super::process::ProcessSnapshot;

pub const NAMESPACE: &str = "mailgun";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Static description of one metric family.
#[derive(Debug)]
pub struct Desc {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
    pub labels: &'static [&'static str],
}

const NAME: &[&str] = &["name"];
const NAME_TYPE: &[&str] = &["name", "type"];

pub static UP: Desc = Desc {
    name: "mailgun_up",
    help: "'1' if the last scrape of Mailgun's API was successful, '0' otherwise.",
    kind: MetricKind::Gauge,
    labels: &[],
};
pub static ACCEPTED: Desc = Desc {
    name: "mailgun_domain_accepted_total",
    help: "Mailgun accepted the request for incoming/outgoing to send/forward the email and the message has been placed in queue.",
    kind: MetricKind::Counter,
    labels: NAME_TYPE,
};
pub static CLICKED: Desc = Desc {
    name: "mailgun_domain_clicked_total",
    help: "The email recipient clicked on a link in the email.",
    kind: MetricKind::Counter,
    labels: NAME,
};
pub static COMPLAINED: Desc = Desc {
    name: "mailgun_domain_complained_total",
    help: "The email recipient clicked on the spam complaint button within their email client.",
    kind: MetricKind::Counter,
    labels: NAME,
};
pub static DELIVERED: Desc = Desc {
    name: "mailgun_domain_delivered_total",
    help: "Mailgun sent the email via HTTP or SMTP and it was accepted by the recipient email server.",
    kind: MetricKind::Counter,
    labels: NAME_TYPE,
};
pub static FAILED_PERMANENT: Desc = Desc {
    name: "mailgun_domain_failed_permanent_total",
    help: "All permanently failed emails. Includes bounce, delayed bounce, suppress bounce, suppress complaint, suppress unsubscribe.",
    kind: MetricKind::Counter,
    labels: NAME_TYPE,
};
pub static FAILED_TEMPORARY: Desc = Desc {
    name: "mailgun_domain_failed_temporary_total",
    help: "All temporarily failed emails due to ESP block, that will be retried.",
    kind: MetricKind::Counter,
    labels: NAME_TYPE,
};
pub static OPENED: Desc = Desc {
    name: "mailgun_domain_opened_total",
    help: "The email recipient opened the email and enabled image viewing.",
    kind: MetricKind::Counter,
    labels: NAME,
};
pub static STORED: Desc = Desc {
    name: "mailgun_domain_stored_total",
    help: "Mailgun stored the incoming message for later retrieval.",
    kind: MetricKind::Counter,
    labels: NAME,
};
pub static UNSUBSCRIBED: Desc = Desc {
    name: "mailgun_domain_unsubscribed_total",
    help: "The email recipient clicked on the unsubscribe link.",
    kind: MetricKind::Counter,
    labels: NAME,
};
pub static STATE: Desc = Desc {
    name: "mailgun_domain_state",
    help: "Is the domain active (1) or disabled (0).",
    kind: MetricKind::Gauge,
    labels: NAME,
};

/// Every family, in exposition order.
pub static CATALOG: [&Desc; 11] = [
    &UP,
    &ACCEPTED,
    &CLICKED,
    &COMPLAINED,
    &DELIVERED,
    &FAILED_PERMANENT,
    &FAILED_TEMPORARY,
    &OPENED,
    &STORED,
    &UNSUBSCRIBED,
    &STATE,
];

pub static SCRAPES: Desc = Desc {
    name: "mailgun_exporter_scrapes_total",
    help: "Total number of scrapes served by the metrics endpoint.",
    kind: MetricKind::Counter,
    labels: &[],
};
pub static PROCESS_CPU: Desc = Desc {
    name: "process_cpu_seconds_total",
    help: "Total user and system CPU time spent in seconds.",
    kind: MetricKind::Counter,
    labels: &[],
};
pub static PROCESS_RESIDENT_MEMORY: Desc = Desc {
    name: "process_resident_memory_bytes",
    help: "Resident memory size in bytes.",
    kind: MetricKind::Gauge,
    labels: &[],
};
pub static PROCESS_VIRTUAL_MEMORY: Desc = Desc {
    name: "process_virtual_memory_bytes",
    help: "Virtual memory size in bytes.",
    kind: MetricKind::Gauge,
    labels: &[],
};
pub static PROCESS_START_TIME: Desc = Desc {
    name: "process_start_time_seconds",
    help: "Start time of the process since unix epoch in seconds.",
    kind: MetricKind::Gauge,
    labels: &[],
};

/// Exporter self-observation families, rendered after [`CATALOG`].
pub static SELF_CATALOG: [&Desc; 5] = [
    &SCRAPES,
    &PROCESS_CPU,
    &PROCESS_RESIDENT_MEMORY,
    &PROCESS_VIRTUAL_MEMORY,
    &PROCESS_START_TIME,
];

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label_values: Vec<String>,
    pub value: f64,
}

struct Family {
    desc: &'static Desc,
    samples: Vec<Sample>,
}

impl Family {
    fn render(&self, out: &mut String) {
        let d = self.desc;
        let _ = writeln!(out, "# HELP {} {}", d.name, escape_help(d.help));
        let _ = writeln!(out, "# TYPE {} {}", d.name, d.kind.as_str());
        for s in &self.samples {
            if d.labels.is_empty() {
                let _ = writeln!(out, "{} {}", d.name, s.value);
                continue;
            }
            let label_str = d
                .labels
                .iter()
                .zip(&s.label_values)
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", d.name, label_str, s.value);
        }
    }
}

/// Samples of one scrape, grouped by family.
pub struct Exposition {
    families: Vec<Family>,
}

impl Exposition {
    fn empty() -> Self {
        let families = CATALOG
            .iter()
            .chain(SELF_CATALOG.iter())
            .map(|d| Family {
                desc: *d,
                samples: Vec::new(),
            })
            .collect();
        Self { families }
    }

    /// Translate a scrape report into samples.
    pub fn from_report(report: &ScrapeReport) -> Self {
        let mut exp = Self::empty();
        for r in &report.results {
            exp.push(&STATE, &[r.domain.as_str()], r.state_value());
            if let Some(agg) = r.aggregate() {
                exp.push_domain(&r.domain, agg);
            }
        }
        exp.push(&UP, &[], report.up_value());
        exp
    }

    /// Add the served-scrapes counter and, when available, process usage.
    pub fn with_self_metrics(mut self, scrapes: u64, process: Option<&ProcessSnapshot>) -> Self {
        self.push(&SCRAPES, &[], scrapes as f64);
        if let Some(p) = process {
            self.push(&PROCESS_CPU, &[], p.cpu_seconds);
            self.push(&PROCESS_RESIDENT_MEMORY, &[], p.resident_memory_bytes as f64);
            self.push(&PROCESS_VIRTUAL_MEMORY, &[], p.virtual_memory_bytes as f64);
            self.push(&PROCESS_START_TIME, &[], p.start_time_seconds as f64);
        }
        self
    }

    fn push_domain(&mut self, domain: &str, a: &DomainAggregate) {
        let typed: [(&'static Desc, &str, u64); 10] = [
            (&ACCEPTED, "incoming", a.accepted_incoming),
            (&ACCEPTED, "outgoing", a.accepted_outgoing),
            (&DELIVERED, "http", a.delivered_http),
            (&DELIVERED, "smtp", a.delivered_smtp),
            (&FAILED_PERMANENT, "bounce", a.failed_permanent_bounce),
            (&FAILED_PERMANENT, "delayed_bounce", a.failed_permanent_delayed_bounce),
            (&FAILED_PERMANENT, "suppress_bounce", a.failed_permanent_suppress_bounce),
            (
                &FAILED_PERMANENT,
                "suppress_complaint",
                a.failed_permanent_suppress_complaint,
            ),
            (
                &FAILED_PERMANENT,
                "suppress_unsubscribe",
                a.failed_permanent_suppress_unsubscribe,
            ),
            (&FAILED_TEMPORARY, "esp_block", a.failed_temporary_esp_block),
        ];
        for (desc, ty, v) in typed {
            self.push(desc, &[domain, ty], v as f64);
        }

        let plain: [(&'static Desc, u64); 5] = [
            (&CLICKED, a.clicked),
            (&COMPLAINED, a.complained),
            (&OPENED, a.opened),
            (&STORED, a.stored),
            (&UNSUBSCRIBED, a.unsubscribed),
        ];
        for (desc, v) in plain {
            self.push(desc, &[domain], v as f64);
        }
    }

    fn push(&mut self, desc: &'static Desc, label_values: &[&str], value: f64) {
        debug_assert_eq!(desc.labels.len(), label_values.len());
        if let Some(f) = self.families.iter_mut().find(|f| std::ptr::eq(f.desc, desc)) {
            f.samples.push(Sample {
                label_values: label_values.iter().map(|v| v.to_string()).collect(),
                value,
            });
        }
    }

    /// Samples recorded for the family named `name`.
    pub fn samples(&self, name: &str) -> &[Sample] {
        self.families
            .iter()
            .find(|f| f.desc.name == name)
            .map(|f| f.samples.as_slice())
            .unwrap_or(&[])
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for f in &self.families {
            f.render(&mut out);
        }
        out
    }
}
