//! In-memory saved-jobs store.
//!
//! One `SavedJobs` instance is shared (behind an `Arc`) by every consumer.
//! The collection is only reachable through the store's operations; readers
//! get snapshots or a `watch` subscription, never the backing vector.

use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info};

use crate::{
    ApplicationData, ApplicationResponse, ApplicationSubmitter, Job, LoggingSubmitter, SubmitError,
};

const NOTICE_CAPACITY: usize = 64;

/// A user-facing message raised by a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The id was already present; the collection is unchanged.
    AlreadySaved(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub response: ApplicationResponse,
    pub notice: Notice,
}

pub struct SavedJobs<S = LoggingSubmitter> {
    jobs: watch::Sender<Vec<Job>>,
    notices: broadcast::Sender<Notice>,
    submitter: S,
}

impl SavedJobs<LoggingSubmitter> {
    pub fn new() -> Self {
        Self::with_submitter(LoggingSubmitter)
    }
}

impl Default for SavedJobs<LoggingSubmitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ApplicationSubmitter> SavedJobs<S> {
    pub fn with_submitter(submitter: S) -> Self {
        let (jobs, _) = watch::channel(Vec::new());
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            jobs,
            notices,
            submitter,
        }
    }

    /// Appends `job` unless a job with the same id is already saved.
    pub fn save(&self, job: Job) -> SaveOutcome {
        let id = job.id.clone();
        let inserted = self.jobs.send_if_modified(|jobs| {
            if jobs.iter().any(|j| j.id == job.id) {
                return false;
            }
            jobs.push(job);
            true
        });

        if inserted {
            debug!(job_id = %id, "Saved job");
            SaveOutcome::Saved
        } else {
            let notice = Notice::Info("Job already saved".to_string());
            self.emit(notice.clone());
            SaveOutcome::AlreadySaved(notice)
        }
    }

    /// Removes the job with `id`. Returns false if nothing was removed.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.jobs.send_if_modified(|jobs| {
            let before = jobs.len();
            jobs.retain(|j| j.id != id);
            jobs.len() != before
        });
        if removed {
            debug!(job_id = %id, "Removed saved job");
        }
        removed
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.jobs.borrow().iter().any(|j| j.id == id)
    }

    pub fn get(&self, id: &str) -> Option<Job> {
        self.jobs.borrow().iter().find(|j| j.id == id).cloned()
    }

    pub fn snapshot(&self) -> Vec<Job> {
        self.jobs.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.jobs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.borrow().is_empty()
    }

    /// Receives a fresh snapshot after every change to the collection.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Job>> {
        self.jobs.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Submits an application for `job`.
    ///
    /// On success the job leaves the collection (whether or not it was saved)
    /// and a success notice naming the title is emitted. On failure an error
    /// notice is emitted, the collection is untouched and the error returned.
    pub async fn apply(&self, job: &Job, data: &ApplicationData) -> Result<Applied, SubmitError> {
        match self.submitter.submit(job, data).await {
            Ok(response) => {
                self.remove(&job.id);
                info!(
                    job_id = %job.id,
                    application_id = %response.application_id,
                    "Application submitted"
                );
                let notice = Notice::Success(format!("Application submitted for {}!", job.title));
                self.emit(notice.clone());
                Ok(Applied { response, notice })
            }
            Err(err) => {
                error!(job_id = %job.id, error = %err, "Application failed");
                self.emit(Notice::Error("Failed to submit application".to_string()));
                Err(err)
            }
        }
    }

    fn emit(&self, notice: Notice) {
        // No subscribers is fine; the caller also gets the notice back.
        let _ = self.notices.send(notice);
    }
}
