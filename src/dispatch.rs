//! Concurrent dispatch of certificate fetches.
//!
//! Every host gets its own Tokio task; a semaphore caps how many run at once.
//! Outcomes are gathered through `FuturesUnordered` as tasks finish, so a slow
//! host only delays its own result. The collecting loop is the only writer of
//! the result vector.

use std::future::Future;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};

use crate::initialization::init_semaphore;
use crate::models::{FetchErrorKind, FetchOutcome, HostTarget};
use crate::tls::CertificateFetcher;

/// Runs `fetch` once per host with at most `max_concurrency` in flight.
///
/// Returns one `(host, outcome)` pair per input host, in completion order.
/// Waits for every host before returning. A task that panics is reported as an
/// `Unknown` failure for its host and does not affect the others.
pub async fn run_all_with<F, Fut>(
    hosts: &[HostTarget],
    max_concurrency: usize,
    fetch: F,
) -> Vec<(HostTarget, FetchOutcome)>
where
    F: Fn(HostTarget) -> Fut,
    Fut: Future<Output = FetchOutcome> + Send + 'static,
{
    let semaphore = init_semaphore(max_concurrency.max(1));
    let mut tasks = FuturesUnordered::new();

    for host in hosts {
        let semaphore = Arc::clone(&semaphore);
        let work = fetch(host.clone());
        let handle = tokio::spawn(async move {
            // The semaphore is never closed, so acquisition only fails if it is dropped
            let _permit = semaphore.acquire_owned().await;
            work.await
        });
        let host = host.clone();
        tasks.push(async move { (host, handle.await) });
    }

    let mut results = Vec::with_capacity(hosts.len());
    while let Some((host, joined)) = tasks.next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(join_error) => {
                warn!("Check task for {host} panicked: {join_error:?}");
                FetchOutcome::failure(
                    FetchErrorKind::Unknown,
                    format!("Unexpected error for {}: check task failed", host.hostname),
                )
            }
        };
        debug!("Finished {host} ({}/{})", results.len() + 1, hosts.len());
        results.push((host, outcome));
    }
    results
}

/// Fetches certificate expiry for every host using a shared [`CertificateFetcher`].
pub async fn run_all(
    hosts: &[HostTarget],
    max_concurrency: usize,
    fetcher: Arc<CertificateFetcher>,
) -> Vec<(HostTarget, FetchOutcome)> {
    run_all_with(hosts, max_concurrency, move |host| {
        let fetcher = Arc::clone(&fetcher);
        async move { fetcher.fetch(&host).await }
    })
    .await
}
