//! HTTP surface for the three board views: job finder, saved jobs and the
//! application form.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use common::{
    ApplicationForm, ApplicationResponse, FormErrors, Job, Notice, SaveOutcome, SavedJobs,
    SubmitError, filter_jobs,
};
use ingest::{IngestError, JobClient};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::listing::Listing;

/// Shared application state
pub struct AppState {
    pub listing: Listing,
    pub saved: SavedJobs,
}

impl AppState {
    pub fn new(client: JobClient) -> Self {
        Self {
            listing: Listing::new(client),
            saved: SavedJobs::new(),
        }
    }
}

/// Query parameters for the finder endpoint
#[derive(Debug, Deserialize)]
struct JobsParams {
    q: Option<String>,
    #[serde(default)]
    refresh: bool,
}

#[derive(Debug, Serialize)]
struct JobView {
    job: Job,
    saved: bool,
}

/// Finder response wrapper
#[derive(Debug, Serialize)]
struct JobsResponse {
    query: String,
    total_results: usize,
    saved_count: usize,
    results: Vec<JobView>,
}

#[derive(Debug, Serialize)]
struct SavedResponse {
    total_results: usize,
    results: Vec<Job>,
}

#[derive(Debug, Serialize)]
struct SaveResponse {
    saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
struct RemoveResponse {
    removed: bool,
}

#[derive(Debug, Deserialize)]
struct ApplyRequest {
    job: Job,
    application: ApplicationForm,
}

#[derive(Debug, Serialize)]
struct ApplyResponse {
    application: ApplicationResponse,
    notice: Notice,
}

/// Failures rendered for the client. Logging happens here, not in the core.
#[derive(Debug)]
enum ApiError {
    Ingest(IngestError),
    Form(FormErrors),
    Submit(SubmitError),
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        ApiError::Ingest(err)
    }
}

impl From<FormErrors> for ApiError {
    fn from(err: FormErrors) -> Self {
        ApiError::Form(err)
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        ApiError::Submit(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Ingest(err) => {
                error!(error = %err, "Failed to fetch jobs");
                (StatusCode::BAD_GATEWAY, json!({ "error": err.to_string() }))
            }
            ApiError::Form(err) => {
                warn!(error = %err, "Rejected application form");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "error": err.to_string(), "fields": err.errors }),
                )
            }
            ApiError::Submit(err) => {
                error!(error = %err, "Failed to submit application");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Failed to submit application", "detail": err.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/jobs", get(jobs_handler))
        .route("/saved", get(saved_handler).post(save_handler))
        .route("/saved/{id}", delete(remove_handler))
        .route("/apply", post(apply_handler))
        .with_state(state)
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🔍 Job Board API\n\nEndpoints:\n  GET    /jobs?q=<keywords>&refresh=<bool> - Find jobs\n  GET    /saved                            - List saved jobs\n  POST   /saved                            - Save a job\n  DELETE /saved/<id>                       - Remove a saved job\n  POST   /apply                            - Apply for a job\n\nExample:\n  curl 'http://127.0.0.1:3000/jobs?q=rust'"
}

/// Handler for GET /jobs?q=<keywords>&refresh=<bool>
async fn jobs_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<JobsParams>,
) -> Result<Json<JobsResponse>, ApiError> {
    let query = params.q.unwrap_or_default();
    let jobs = state.listing.jobs(params.refresh).await?;

    let results: Vec<JobView> = filter_jobs(&jobs, &query)
        .into_iter()
        .map(|job| JobView {
            saved: state.saved.is_saved(&job.id),
            job: job.clone(),
        })
        .collect();

    Ok(Json(JobsResponse {
        query,
        total_results: results.len(),
        saved_count: state.saved.len(),
        results,
    }))
}

/// Handler for GET /saved
async fn saved_handler(State(state): State<Arc<AppState>>) -> Json<SavedResponse> {
    let results = state.saved.snapshot();
    Json(SavedResponse {
        total_results: results.len(),
        results,
    })
}

/// Handler for POST /saved
async fn save_handler(
    State(state): State<Arc<AppState>>,
    Json(job): Json<Job>,
) -> Json<SaveResponse> {
    let response = match state.saved.save(job) {
        SaveOutcome::Saved => SaveResponse {
            saved: true,
            notice: None,
        },
        SaveOutcome::AlreadySaved(notice) => SaveResponse {
            saved: false,
            notice: Some(notice),
        },
    };
    Json(response)
}

/// Handler for DELETE /saved/<id>
async fn remove_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<RemoveResponse> {
    Json(RemoveResponse {
        removed: state.saved.remove(&id),
    })
}

/// Handler for POST /apply
async fn apply_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApplyRequest>,
) -> Result<Json<ApplyResponse>, ApiError> {
    let data = request.application.validate()?;
    let applied = state.saved.apply(&request.job, &data).await?;

    Ok(Json(ApplyResponse {
        application: applied.response,
        notice: applied.notice,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Starts a fake job source serving `feed` and a board wired to it.
    async fn board(feed: Value) -> String {
        let source = Router::new().route(
            "/api/v1",
            get(move || {
                let feed = feed.clone();
                async move { Json(feed) }
            }),
        );
        let source_url = format!("{}/api/v1", spawn(source).await);

        let state = Arc::new(AppState::new(JobClient::new(source_url)));
        spawn(router(state)).await
    }

    fn feed() -> Value {
        json!({
            "jobs": [
                { "id": "rust-1", "title": "Rust Engineer", "company": "Ferrous", "tags": ["backend"] },
                { "id": "design-1", "title": "Product Designer", "locations": ["Berlin"] }
            ]
        })
    }

    fn form() -> Value {
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "contact": "(555) 123-4567",
            "reason": "Compilers"
        })
    }

    #[tokio::test]
    async fn test_finder_filters_and_marks_saved() {
        let base = board(feed()).await;
        let http = reqwest::Client::new();

        let found: Value = http
            .get(format!("{base}/jobs?q=rust"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(found["total_results"], 1);
        assert_eq!(found["results"][0]["saved"], false);

        let saved: Value = http
            .post(format!("{base}/saved"))
            .json(&found["results"][0]["job"])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(saved["saved"], true);

        let listing: Value = http
            .get(format!("{base}/jobs"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listing["total_results"], 2);
        assert_eq!(listing["saved_count"], 1);
        assert_eq!(listing["results"][0]["saved"], true);
        assert_eq!(listing["results"][1]["saved"], false);
    }

    #[tokio::test]
    async fn test_duplicate_save_returns_notice() {
        let base = board(feed()).await;
        let http = reqwest::Client::new();
        let job = json!({ "id": "rust-1", "title": "Rust Engineer" });

        http.post(format!("{base}/saved")).json(&job).send().await.unwrap();
        let again: Value = http
            .post(format!("{base}/saved"))
            .json(&job)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(again["saved"], false);
        assert_eq!(again["notice"]["kind"], "info");
        assert_eq!(again["notice"]["message"], "Job already saved");

        let saved: Value = http
            .get(format!("{base}/saved"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(saved["total_results"], 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let base = board(feed()).await;
        let http = reqwest::Client::new();
        http.post(format!("{base}/saved"))
            .json(&json!({ "id": "rust-1", "title": "Rust Engineer" }))
            .send()
            .await
            .unwrap();

        for expected in [true, false] {
            let removed: Value = http
                .delete(format!("{base}/saved/rust-1"))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            assert_eq!(removed["removed"], expected);
        }
    }

    #[tokio::test]
    async fn test_apply_removes_saved_job() {
        let base = board(feed()).await;
        let http = reqwest::Client::new();
        let job = json!({ "id": "rust-1", "title": "Rust Engineer" });
        http.post(format!("{base}/saved")).json(&job).send().await.unwrap();

        let response = http
            .post(format!("{base}/apply"))
            .json(&json!({ "job": job, "application": form() }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["application"]["jobId"], "rust-1");
        assert_eq!(body["application"]["status"], "submitted");
        assert_eq!(
            body["notice"]["message"],
            "Application submitted for Rust Engineer!"
        );

        let saved: Value = http
            .get(format!("{base}/saved"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(saved["total_results"], 0);
    }

    #[tokio::test]
    async fn test_apply_accepts_unformatted_digits() {
        let base = board(feed()).await;
        let mut application = form();
        application["contact"] = json!("5551234567");

        let response = reqwest::Client::new()
            .post(format!("{base}/apply"))
            .json(&json!({
                "job": { "id": "design-1", "title": "Product Designer" },
                "application": application
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["application"]["jobId"], "design-1");
    }

    #[tokio::test]
    async fn test_invalid_form_is_rejected() {
        let base = board(feed()).await;
        let http = reqwest::Client::new();
        let job = json!({ "id": "rust-1", "title": "Rust Engineer" });
        http.post(format!("{base}/saved")).json(&job).send().await.unwrap();

        let response = http
            .post(format!("{base}/apply"))
            .json(&json!({ "job": job, "application": { "name": "Ada", "email": "nope" } }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 422);

        let body: Value = response.json().await.unwrap();
        let fields: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["email", "contact", "reason"]);

        let saved: Value = http
            .get(format!("{base}/saved"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(saved["total_results"], 1);
    }

    #[tokio::test]
    async fn test_bad_feed_maps_to_bad_gateway() {
        let base = board(json!([{ "id": "x", "title": "A" }, { "id": "x", "title": "B" }])).await;

        let response = reqwest::get(format!("{base}/jobs")).await.unwrap();
        assert_eq!(response.status().as_u16(), 502);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "duplicate job IDs detected: x");
    }
}
