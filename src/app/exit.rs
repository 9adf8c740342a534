//! Process exit status derived from a run's results.

use crate::config::{EXIT_CRITICAL, EXIT_ERROR, EXIT_OK};
use crate::models::{CertificateStatus, CheckResult};

/// Maps results to the process exit code.
///
/// Any CRITICAL host gives [`EXIT_CRITICAL`], even if other hosts failed.
/// Otherwise any ERROR gives [`EXIT_ERROR`]. WARNING hosts alone exit 0.
pub fn exit_code(results: &[CheckResult]) -> i32 {
    let has = |status| results.iter().any(|r| r.status == status);
    if has(CertificateStatus::Critical) {
        EXIT_CRITICAL
    } else if has(CertificateStatus::Error) {
        EXIT_ERROR
    } else {
        EXIT_OK
    }
}
