use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{ApplicationData, ApplicationResponse, ApplicationStatus, Job};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission service unavailable: {0}")]
    Unavailable(String),
}

/// Boundary to whatever service receives job applications.
pub trait ApplicationSubmitter: Send + Sync {
    fn submit(
        &self,
        job: &Job,
        data: &ApplicationData,
    ) -> impl Future<Output = Result<ApplicationResponse, SubmitError>> + Send;
}

/// Stand-in submitter: logs the application and accepts it immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSubmitter;

impl ApplicationSubmitter for LoggingSubmitter {
    async fn submit(
        &self,
        job: &Job,
        data: &ApplicationData,
    ) -> Result<ApplicationResponse, SubmitError> {
        info!(
            job_id = %job.id,
            title = %job.title,
            applicant = %data.name,
            email = %data.email,
            "Submitting application"
        );

        Ok(ApplicationResponse {
            application_id: Uuid::new_v4().to_string(),
            job_id: job.id.clone(),
            status: ApplicationStatus::Submitted,
            message: None,
        })
    }
}
