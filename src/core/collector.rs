use crate::core::models::StatusRecord;
use crate::core::probe::Probe;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Probe every host with at most `limit` probes in flight. Hosts that fail,
/// time out, or panic contribute no record and never disturb their siblings.
/// Output order is not guaranteed to match input order; duplicates in the
/// input produce duplicate probes.
pub async fn collect(probe: Arc<dyn Probe>, hosts: &[String], limit: usize) -> Vec<StatusRecord> {
    let semaphore = Arc::new(Semaphore::new(limit));

    let tasks: Vec<_> = hosts
        .iter()
        .map(|host| {
            let probe = Arc::clone(&probe);
            let semaphore = Arc::clone(&semaphore);
            let host = host.clone();
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                tracing::debug!("probing host {}", host);
                probe.probe(&host).await
            })
        })
        .collect();

    let mut records = Vec::new();
    for (result, host) in join_all(tasks).await.into_iter().zip(hosts) {
        match result {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => tracing::warn!("probe task for {} aborted: {}", host, e),
        }
    }
    records
}
