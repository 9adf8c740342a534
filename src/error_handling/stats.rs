//! Run statistics tracking.
//!
//! Thread-safe counters for result statuses and fetch failure kinds, logged
//! at the end of a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use crate::models::{CertificateStatus, CheckResult, FetchErrorKind};

/// Thread-safe run statistics tracker.
///
/// Every status and failure kind is seeded at zero on creation, so lookups
/// never miss. Share across tasks with `Arc`.
pub struct CheckStats {
    statuses: HashMap<CertificateStatus, AtomicUsize>,
    failures: HashMap<FetchErrorKind, AtomicUsize>,
}

impl CheckStats {
    pub fn new() -> Self {
        let mut statuses = HashMap::new();
        for status in CertificateStatus::iter() {
            statuses.insert(status, AtomicUsize::new(0));
        }

        let mut failures = HashMap::new();
        for kind in FetchErrorKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        CheckStats { statuses, failures }
    }

    /// Records a classified result: its status and, if it failed, its failure kind.
    pub fn record(&self, result: &CheckResult) {
        self.increment_status(result.status);
        if let Some(kind) = result.error_kind() {
            self.increment_failure(kind);
        }
    }

    pub fn increment_status(&self, status: CertificateStatus) {
        if let Some(counter) = self.statuses.get(&status) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_failure(&self, kind: FetchErrorKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn get_status_count(&self, status: CertificateStatus) -> usize {
        self.statuses
            .get(&status)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_failure_count(&self, kind: FetchErrorKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_checked(&self) -> usize {
        self.statuses.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.failures.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Logs a per-status summary and a breakdown of failure kinds.
    pub fn log_summary(&self) {
        let summary = CertificateStatus::iter()
            .map(|status| format!("{}={}", status, self.get_status_count(status)))
            .collect::<Vec<_>>()
            .join(", ");
        log::info!("Checked {} host(s): {}", self.total_checked(), summary);

        if self.total_failures() == 0 {
            return;
        }
        for kind in FetchErrorKind::iter() {
            let count = self.get_failure_count(kind);
            if count > 0 {
                log::info!("   {}: {}", kind, count);
            }
        }
    }
}

impl Default for CheckStats {
    fn default() -> Self {
        Self::new()
    }
}
