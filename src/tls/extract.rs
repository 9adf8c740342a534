//! Certificate extraction utilities.

use anyhow::Result;
use chrono::{DateTime, Utc};

/// Parses a DER-encoded X.509 certificate and returns its notAfter instant.
///
/// # Errors
///
/// Returns an error if the certificate cannot be parsed or the timestamp is
/// outside the range `chrono` can represent.
pub(crate) fn parse_not_after(der: &[u8]) -> Result<DateTime<Utc>> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)?;
    let timestamp = cert.validity().not_after.timestamp();
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .ok_or_else(|| anyhow::anyhow!("notAfter timestamp out of range: {}", timestamp))
}
