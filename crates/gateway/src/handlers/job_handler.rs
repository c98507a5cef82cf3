//! Job handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use domain::Job;

use crate::error::{AppError, AppResult};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Job creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company cannot be empty"))]
    pub company: String,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: String,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub posted_date: DateTime<Utc>,
    #[validate(url(message = "Invalid posting URL"))]
    pub url: String,
}

impl From<CreateJobRequest> for Job {
    fn from(req: CreateJobRequest) -> Self {
        let mut job = Job::new(
            req.title,
            req.company,
            req.location,
            req.description,
            req.posted_date,
            req.url,
        )
        .with_required_skills(req.required_skills);
        job.salary = req.salary;
        job.job_type = req.job_type;
        job.experience_level = req.experience_level;
        job
    }
}

/// Create job routes
pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job))
        .route("/:id", get(get_job))
}

pub async fn create_job(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> AppResult<(StatusCode, Json<Job>)> {
    let mut job = Job::from(req);
    state
        .jobs
        .insert(&mut job, state.request_deadline())
        .await
        .map_err(|e| AppError::from_store(e, "Job"))?;

    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Job>> {
    let job = state
        .jobs
        .find_by_id(&id, state.request_deadline())
        .await
        .map_err(|e| AppError::from_store(e, "Job"))?;

    Ok(Json(job))
}
