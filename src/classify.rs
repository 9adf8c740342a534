//! Status classification.
//!
//! Turns a fetch outcome and the configured thresholds into a severity and a
//! day count. Day counts are floored, so a certificate that expired an hour ago
//! is at -1 days and one expiring in 7 days and 23 hours is at 7.

use chrono::{DateTime, Utc};

use crate::config::SECONDS_PER_DAY;
use crate::models::{CertificateStatus, CheckResult, FetchOutcome, HostTarget, Thresholds};

/// Whole days from `now` until `expiry`, rounded toward the earlier value.
pub fn days_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expiry - now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Maps a day count onto a status. CRITICAL wins when both thresholds match.
pub fn status_for_days(days: i64, thresholds: &Thresholds) -> CertificateStatus {
    if days <= i64::from(thresholds.critical_days) {
        CertificateStatus::Critical
    } else if days <= i64::from(thresholds.warning_days) {
        CertificateStatus::Warning
    } else {
        CertificateStatus::Ok
    }
}

/// Classifies a fetch outcome.
///
/// Failures are always `Error` with no day count, whatever the thresholds.
pub fn classify(
    outcome: &FetchOutcome,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> (CertificateStatus, Option<i64>) {
    match outcome {
        FetchOutcome::Failure { .. } => (CertificateStatus::Error, None),
        FetchOutcome::Success { expiry } => {
            let days = days_until(*expiry, now);
            (status_for_days(days, thresholds), Some(days))
        }
    }
}

/// Builds the [`CheckResult`] for one host.
pub fn check_result(
    host: HostTarget,
    outcome: FetchOutcome,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> CheckResult {
    let (status, days_until_expiry) = classify(&outcome, thresholds, now);
    CheckResult {
        host,
        outcome,
        days_until_expiry,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FetchErrorKind;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn expiring_in(days: i64) -> FetchOutcome {
        FetchOutcome::Success {
            expiry: now() + Duration::days(days),
        }
    }

    #[test]
    fn test_threshold_boundaries() {
        let thresholds = Thresholds {
            critical_days: 7,
            warning_days: 30,
        };
        let cases = [
            (7, CertificateStatus::Critical),
            (8, CertificateStatus::Warning),
            (30, CertificateStatus::Warning),
            (31, CertificateStatus::Ok),
            (-5, CertificateStatus::Critical),
            (0, CertificateStatus::Critical),
        ];
        for (days, expected) in cases {
            let (status, computed) = classify(&expiring_in(days), &thresholds, now());
            assert_eq!(status, expected, "{days} days");
            assert_eq!(computed, Some(days));
        }
    }

    #[test]
    fn test_expired_is_critical_and_flagged() {
        let result = check_result(
            HostTarget::new("old.example.com", 443),
            expiring_in(-5),
            &Thresholds::default(),
            now(),
        );
        assert_eq!(result.status, CertificateStatus::Critical);
        assert!(result.is_expired());
    }

    #[test]
    fn test_failure_is_error_regardless_of_thresholds() {
        let outcome = FetchOutcome::failure(FetchErrorKind::Timeout, "Connection timeout");
        for (critical_days, warning_days) in [(0, 0), (7, 30), (365, 10), (u32::MAX, u32::MAX)] {
            let thresholds = Thresholds {
                critical_days,
                warning_days,
            };
            assert_eq!(
                classify(&outcome, &thresholds, now()),
                (CertificateStatus::Error, None)
            );
        }
    }

    #[test]
    fn test_partial_days_floor() {
        let almost_eight = now() + Duration::days(8) - Duration::seconds(1);
        assert_eq!(days_until(almost_eight, now()), 7);

        let an_hour_ago = now() - Duration::hours(1);
        assert_eq!(days_until(an_hour_ago, now()), -1);

        let in_an_hour = now() + Duration::hours(1);
        assert_eq!(days_until(in_an_hour, now()), 0);
    }

    #[test]
    fn test_critical_takes_precedence_when_thresholds_overlap() {
        let thresholds = Thresholds {
            critical_days: 30,
            warning_days: 7,
        };
        assert_eq!(status_for_days(20, &thresholds), CertificateStatus::Critical);
        assert_eq!(status_for_days(31, &thresholds), CertificateStatus::Ok);
    }

    #[test]
    fn test_equal_thresholds_never_warn() {
        let thresholds = Thresholds {
            critical_days: 14,
            warning_days: 14,
        };
        assert_eq!(status_for_days(14, &thresholds), CertificateStatus::Critical);
        assert_eq!(status_for_days(15, &thresholds), CertificateStatus::Ok);
    }
}
