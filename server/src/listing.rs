//! Current job listing for the finder view.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use common::Job;
use ingest::{IngestError, JobClient};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Snapshot {
    seq: u64,
    jobs: Option<Arc<Vec<Job>>>,
}

/// Holds the last published ingestion result.
///
/// Every fetch takes a sequence number when it starts. A result is published
/// only if no fetch that started later has published already, so overlapping
/// refreshes settle on the newest request rather than the slowest response.
pub struct Listing {
    client: JobClient,
    next_seq: AtomicU64,
    current: RwLock<Snapshot>,
}

impl Listing {
    pub fn new(client: JobClient) -> Self {
        Self {
            client,
            next_seq: AtomicU64::new(0),
            current: RwLock::new(Snapshot::default()),
        }
    }

    /// Returns the published listing, fetching first if there is none yet
    /// or `refresh` is set.
    pub async fn jobs(&self, refresh: bool) -> Result<Arc<Vec<Job>>, IngestError> {
        if !refresh {
            if let Some(jobs) = self.current.read().await.jobs.clone() {
                return Ok(jobs);
            }
        }
        self.refresh().await
    }

    pub async fn refresh(&self) -> Result<Arc<Vec<Job>>, IngestError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let jobs = self.client.fetch_jobs().await?;
        Ok(self.publish(seq, Arc::new(jobs)).await)
    }

    /// Publishes `jobs` for request `seq` unless a newer request already
    /// published. Returns whichever listing is current afterwards.
    async fn publish(&self, seq: u64, jobs: Arc<Vec<Job>>) -> Arc<Vec<Job>> {
        let mut current = self.current.write().await;
        if seq > current.seq {
            current.seq = seq;
            current.jobs = Some(Arc::clone(&jobs));
            return jobs;
        }

        debug!(seq, latest = current.seq, "Discarding stale job listing");
        current.jobs.clone().unwrap_or(jobs)
    }
}
