// Shared test helpers for local endpoints and result construction.
//
// Integration tests never touch the network: hosts are 127.0.0.1 listeners
// that refuse, hang or answer with something that is not TLS.

use std::net::SocketAddr;
use std::time::Duration;

use cert_expiry::{CertificateStatus, CheckResult, FetchErrorKind, FetchOutcome, HostTarget};
use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Returns a local port with nothing listening on it.
#[allow(dead_code)] // Used by other test files
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    port
}

/// Starts a listener that accepts connections and never writes a byte.
#[allow(dead_code)] // Used by other test files
pub async fn hanging_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    addr
}

/// Starts a listener that answers every connection with a plain HTTP response.
#[allow(dead_code)] // Used by other test files
pub async fn plaintext_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream
                    .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n")
                    .await;
                let _ = stream.shutdown().await;
            });
        }
    });
    addr
}

/// Builds a classified result without going through the fetcher.
#[allow(dead_code)] // Used by other test files
pub fn result(host: &str, status: CertificateStatus, days: Option<i64>) -> CheckResult {
    let outcome = match days {
        Some(days) => FetchOutcome::Success {
            expiry: Utc::now() + chrono::Duration::days(days) + chrono::Duration::hours(1),
        },
        None => FetchOutcome::failure(
            FetchErrorKind::Unknown,
            format!("Unexpected error for {host}: connection refused"),
        ),
    };
    CheckResult {
        host: HostTarget::new(host, 443),
        outcome,
        days_until_expiry: days,
        status,
    }
}

#[allow(dead_code)] // Used by other test files
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);
