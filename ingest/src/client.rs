use common::Job;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{IngestError, Result};
use crate::normalize::normalize;

pub const DEFAULT_ENDPOINT: &str = "https://empllo.com/api/v1";

/// Fetches the job feed with one unauthenticated GET. No retries, no timeout.
#[derive(Debug, Clone)]
pub struct JobClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for JobClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl JobClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Downloads the raw JSON response. Non-success statuses are errors.
    pub async fn fetch_raw(&self) -> Result<Value> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }

    /// Downloads and normalizes the whole feed.
    pub async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        info!(endpoint = %self.endpoint, "Fetching jobs");

        let raw = match self.fetch_raw().await {
            Ok(raw) => raw,
            Err(err) => {
                let status = match &err {
                    IngestError::Transport(e) => e.status().map(|s| s.as_u16()),
                    _ => None,
                };
                error!(endpoint = %self.endpoint, ?status, error = %err, "Job source request failed");
                return Err(err);
            }
        };

        let jobs = normalize(raw)?;
        info!(count = jobs.len(), "Fetched jobs");
        Ok(jobs)
    }
}
