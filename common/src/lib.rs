//! Shared job-board types: the job record, application form handling,
//! local search and the saved-jobs store.

pub mod application;
pub mod job;
pub mod search;
pub mod store;
pub mod submit;

pub use application::{
    ApplicationData, ApplicationForm, ApplicationResponse, ApplicationStatus, FieldError,
    FormErrors, FormField, format_phone_number,
};
pub use job::{Job, NOT_SPECIFIED, UNKNOWN_COMPANY};
pub use search::filter_jobs;
pub use store::{Applied, Notice, SaveOutcome, SavedJobs};
pub use submit::{ApplicationSubmitter, LoggingSubmitter, SubmitError};
