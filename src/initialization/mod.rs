//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - TLS crypto provider
//! - DNS resolver
//! - HTTP client for webhook delivery
//! - Concurrency semaphore

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use rustls::crypto::{ring::default_provider, CryptoProvider};
use tokio::sync::Semaphore;

// Re-export public API
pub use client::{init_webhook_client, init_webhook_client_with_timeout};
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes a semaphore for controlling concurrency.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent operations allowed
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}

/// Initializes the process-wide crypto provider for TLS operations.
///
/// The certificate fetcher passes its provider explicitly, but the SMTP and
/// webhook clients build their TLS configs from the process default. Call this
/// once at startup, before any alert is sent.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
