//! TLS certificate expiry fetching.
//!
//! This module connects to a host's TLS endpoint and reads the notAfter date
//! of the leaf certificate it presents. Each stage (DNS lookup, TCP connect,
//! TLS handshake) is bounded by the configured timeout, and every failure is
//! reported as a typed [`FetchOutcome::Failure`] rather than an error.
//!
//! Uses `hickory-resolver` for lookups, `tokio-rustls` with the webpki root
//! store for the handshake and `x509-parser` for certificate parsing.

mod extract;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use log::{debug, error, info};
use rustls::crypto::ring::default_provider;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::error_handling::FetchError;
use crate::models::{FetchOutcome, HostTarget};

pub(crate) use extract::parse_not_after;

/// Reads certificate expiry dates from TLS endpoints.
///
/// Holds the TLS connector and DNS resolver so a single instance can be shared
/// (behind `Arc`) by every task in a run.
pub struct CertificateFetcher {
    connector: TlsConnector,
    resolver: Arc<TokioAsyncResolver>,
    timeout: Duration,
}

impl CertificateFetcher {
    /// Creates a fetcher that verifies peers against the webpki root store.
    ///
    /// # Errors
    ///
    /// Returns a `rustls::Error` if the TLS client configuration cannot be built.
    pub fn new(
        resolver: Arc<TokioAsyncResolver>,
        timeout: Duration,
    ) -> Result<Self, rustls::Error> {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder_with_provider(Arc::new(default_provider()))
            .with_safe_default_protocol_versions()?
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            resolver,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches the expiry timestamp of the certificate served by `target`.
    ///
    /// Makes a single attempt. Never fails: errors are returned as
    /// `FetchOutcome::Failure` and logged.
    pub async fn fetch(&self, target: &HostTarget) -> FetchOutcome {
        info!("Checking certificate for {target}");
        match self.try_fetch(target).await {
            Ok(expiry) => {
                info!("Certificate for {target} expires {expiry}");
                FetchOutcome::Success { expiry }
            }
            Err(e) => {
                error!("{e}");
                FetchOutcome::failure(e.kind(), e.to_string())
            }
        }
    }

    async fn try_fetch(&self, target: &HostTarget) -> Result<DateTime<Utc>, FetchError> {
        let host = target.hostname.as_str();

        let server_name =
            ServerName::try_from(host.to_string()).map_err(|e| FetchError::Dns {
                host: host.to_string(),
                detail: format!("invalid hostname: {e}"),
            })?;

        let addrs = self.resolve(target).await?;
        let sock = self.connect(target, &addrs).await?;

        let tls_stream = match tokio::time::timeout(
            self.timeout,
            self.connector.connect(server_name, sock),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(FetchError::Tls {
                    host: host.to_string(),
                    detail: e.to_string(),
                })
            }
            Err(_) => return Err(self.timeout_error(host, "TLS handshake")),
        };

        let leaf = tls_stream
            .get_ref()
            .1
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or_else(|| FetchError::unknown(host, "server presented no certificate"))?;

        parse_not_after(leaf.as_ref())
            .map_err(|e| FetchError::unknown(host, format!("failed to parse certificate: {e}")))
    }

    /// Resolves the target to socket addresses. IP literals skip the lookup.
    async fn resolve(&self, target: &HostTarget) -> Result<Vec<SocketAddr>, FetchError> {
        let host = target.hostname.as_str();
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![SocketAddr::new(ip, target.port)]);
        }

        debug!("Resolving {host}");
        let lookup = match tokio::time::timeout(self.timeout, self.resolver.lookup_ip(host)).await
        {
            Ok(Ok(lookup)) => lookup,
            Ok(Err(e)) => {
                if matches!(e.kind(), ResolveErrorKind::Timeout) {
                    return Err(self.timeout_error(host, "DNS lookup"));
                }
                return Err(FetchError::Dns {
                    host: host.to_string(),
                    detail: e.to_string(),
                });
            }
            Err(_) => return Err(self.timeout_error(host, "DNS lookup")),
        };

        let addrs: Vec<SocketAddr> = lookup
            .iter()
            .map(|ip| SocketAddr::new(ip, target.port))
            .collect();
        if addrs.is_empty() {
            return Err(FetchError::Dns {
                host: host.to_string(),
                detail: "no addresses found".to_string(),
            });
        }
        Ok(addrs)
    }

    /// Connects to the first reachable address, trying each in turn.
    async fn connect(
        &self,
        target: &HostTarget,
        addrs: &[SocketAddr],
    ) -> Result<TcpStream, FetchError> {
        let host = target.hostname.as_str();
        let mut last_error = None;

        for addr in addrs {
            debug!("Connecting to {host} at {addr}");
            match tokio::time::timeout(self.timeout, TcpStream::connect(*addr)).await {
                Ok(Ok(sock)) => return Ok(sock),
                Ok(Err(e)) => {
                    debug!("Failed to connect to {addr} for {host}: {e}");
                    last_error = Some(FetchError::unknown(
                        host,
                        format!("failed to connect to {addr}: {e}"),
                    ));
                }
                Err(_) => {
                    debug!("TCP connection timeout for {addr} ({host})");
                    last_error = Some(self.timeout_error(host, "TCP connect"));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::unknown(host, "no addresses to connect to")))
    }

    fn timeout_error(&self, host: &str, stage: &'static str) -> FetchError {
        FetchError::Timeout {
            host: host.to_string(),
            stage,
            timeout: self.timeout,
        }
    }
}
