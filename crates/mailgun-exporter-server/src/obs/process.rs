//! Resource usage of the exporter process itself.
//!
//! Refreshed on every scrape of the metrics path. The `System` handle is
//! locked only for the `/proc` read; a poisoned lock is recovered.

use std::sync::Mutex;

use sysinfo::{Pid, ProcessesToUpdate, System};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSnapshot {
    pub cpu_seconds: f64,
    pub resident_memory_bytes: u64,
    pub virtual_memory_bytes: u64,
    /// Unix time in seconds.
    pub start_time_seconds: u64,
}

pub struct ProcessCollector {
    pid: Option<Pid>,
    system: Mutex<System>,
}

impl Default for ProcessCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessCollector {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = %e, "process metrics unavailable");
                None
            }
        };
        Self {
            pid,
            system: Mutex::new(System::new()),
        }
    }

    /// `None` when the platform does not expose the current process.
    pub fn snapshot(&self) -> Option<ProcessSnapshot> {
        let pid = self.pid?;
        let mut system = match self.system.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let p = system.process(pid)?;
        Some(ProcessSnapshot {
            cpu_seconds: p.accumulated_cpu_time() as f64 / 1000.0,
            resident_memory_bytes: p.memory(),
            virtual_memory_bytes: p.virtual_memory(),
            start_time_seconds: p.start_time(),
        })
    }
}
