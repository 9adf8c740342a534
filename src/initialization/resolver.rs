//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use log::warn;

/// Initializes the DNS resolver used by the certificate fetcher.
///
/// Uses the system configuration (`/etc/resolv.conf` and the hosts file) when
/// it can be read, falling back to the resolver defaults otherwise. The
/// per-query timeout is set to `timeout` and attempts are kept low so an
/// unresolvable host fails quickly.
pub fn init_resolver(timeout: Duration) -> Arc<TokioAsyncResolver> {
    let (config, mut opts) = match read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            warn!("Failed to read system DNS configuration ({e}); using defaults");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    opts.timeout = timeout;
    opts.attempts = 2;

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}
