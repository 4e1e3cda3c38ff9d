use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, Utc};
use model::entities::{job, user};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState, ErrorResponse, database_error, not_found, validation_error};

/// Request body for creating a new job posting
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    /// Free-text salary range, e.g. "$60,000 - $80,000"
    pub salary_range: Option<String>,
    /// One of full-time, part-time, contract, temporary (default full-time)
    pub job_type: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Requirements are required"))]
    pub requirements: String,
    pub responsibilities: Option<String>,
}

/// Request body for replacing a job posting.
/// Updates are full overwrites; every field must be resupplied.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    pub location: String,
    pub salary_range: Option<String>,
    /// One of full-time, part-time, contract, temporary (default full-time)
    pub job_type: Option<String>,
    pub description: String,
    pub requirements: String,
    pub responsibilities: Option<String>,
}

/// Job posting response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub job_type: String,
    pub description: String,
    pub requirements: String,
    pub responsibilities: Option<String>,
    pub is_active: bool,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<job::Model> for JobResponse {
    fn from(model: job::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            company: model.company,
            location: model.location,
            salary_range: model.salary_range,
            job_type: model.job_type.to_value(),
            description: model.description,
            requirements: model.requirements,
            responsibilities: model.responsibilities,
            is_active: model.is_active,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Parse a job type string into the entity enum
fn parse_job_type(value: &str) -> Result<job::JobType, String> {
    match value {
        "full-time" => Ok(job::JobType::FullTime),
        "part-time" => Ok(job::JobType::PartTime),
        "contract" => Ok(job::JobType::Contract),
        "temporary" => Ok(job::JobType::Temporary),
        other => Err(format!("Unknown job type: {other}")),
    }
}

/// Get all active job postings, newest first
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    tag = "jobs",
    responses(
        (status = 200, description = "Jobs retrieved successfully", body = ApiResponse<Vec<JobResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn list_jobs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<JobResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering list_jobs function");
    debug!("Fetching active job postings");

    match job::Entity::find()
        .filter(job::Column::IsActive.eq(true))
        .order_by_desc(job::Column::CreatedAt)
        .order_by_desc(job::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(jobs) => {
            info!("Successfully retrieved {} active jobs", jobs.len());
            let job_responses: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();

            let response = ApiResponse {
                data: job_responses,
                message: "Jobs retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve jobs from database: {}", db_error);
            Err(database_error("Failed to fetch jobs"))
        }
    }
}

/// Get a specific active job posting by ID
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{job_id}",
    tag = "jobs",
    params(
        ("job_id" = i32, Path, description = "Job ID"),
    ),
    responses(
        (status = 200, description = "Job retrieved successfully", body = ApiResponse<JobResponse>),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_job(
    Path(job_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<JobResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_job function for job_id: {}", job_id);

    match job::Entity::find_by_id(job_id)
        .filter(job::Column::IsActive.eq(true))
        .one(&state.db)
        .await
    {
        Ok(Some(job_model)) => {
            info!("Successfully retrieved job {}: {}", job_model.id, job_model.title);
            let response = ApiResponse {
                data: JobResponse::from(job_model),
                message: "Job retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Job with ID {} not found", job_id);
            Err(not_found("Job not found"))
        }
        Err(db_error) => {
            error!("Failed to retrieve job with ID {}: {}", job_id, db_error);
            Err(database_error("Failed to fetch job"))
        }
    }
}

/// Create a new job posting
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    tag = "jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created successfully", body = ApiResponse<JobResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(actor))]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(actor): Extension<Arc<user::Model>>,
    Valid(Json(request)): Valid<Json<CreateJobRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<JobResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_job function");
    debug!(
        "Creating job '{}' at '{}' by actor {}",
        request.title, request.company, actor.id
    );

    let job_type = match request.job_type.as_deref() {
        Some(value) => match parse_job_type(value) {
            Ok(job_type) => job_type,
            Err(parse_error) => return Err(validation_error(parse_error)),
        },
        None => job::JobType::FullTime,
    };

    let now = Utc::now();
    let new_job = job::ActiveModel {
        title: Set(request.title.clone()),
        company: Set(request.company.clone()),
        location: Set(request.location.clone()),
        salary_range: Set(request.salary_range.clone()),
        job_type: Set(job_type),
        description: Set(request.description.clone()),
        requirements: Set(request.requirements.clone()),
        responsibilities: Set(request.responsibilities.clone()),
        is_active: Set(true),
        created_by: Set(Some(actor.id)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_job.insert(&state.db).await {
        Ok(job_model) => {
            info!(
                "Job created successfully with ID: {}, title: {}",
                job_model.id, job_model.title
            );
            let response = ApiResponse {
                data: JobResponse::from(job_model),
                message: "Job created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create job '{}': {}", request.title, db_error);
            Err(database_error("Failed to create job"))
        }
    }
}

/// Replace a job posting
#[utoipa::path(
    put,
    path = "/api/v1/jobs/{job_id}",
    tag = "jobs",
    params(
        ("job_id" = i32, Path, description = "Job ID"),
    ),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated successfully", body = ApiResponse<JobResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_job(
    Path(job_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateJobRequest>>,
) -> Result<Json<ApiResponse<JobResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_job function for job_id: {}", job_id);

    let job_type = match request.job_type.as_deref() {
        Some(value) => match parse_job_type(value) {
            Ok(job_type) => job_type,
            Err(parse_error) => return Err(validation_error(parse_error)),
        },
        None => job::JobType::FullTime,
    };

    let existing_job = match job::Entity::find_by_id(job_id).one(&state.db).await {
        Ok(Some(job_model)) => job_model,
        Ok(None) => {
            warn!("Job with ID {} not found for update", job_id);
            return Err(not_found("Job not found"));
        }
        Err(db_error) => {
            error!("Failed to lookup job with ID {} for update: {}", job_id, db_error);
            return Err(database_error("Failed to fetch job"));
        }
    };

    // Full overwrite; there is no partial-merge semantics on this route.
    let mut job_active: job::ActiveModel = existing_job.into();
    job_active.title = Set(request.title.clone());
    job_active.company = Set(request.company.clone());
    job_active.location = Set(request.location.clone());
    job_active.salary_range = Set(request.salary_range.clone());
    job_active.job_type = Set(job_type);
    job_active.description = Set(request.description.clone());
    job_active.requirements = Set(request.requirements.clone());
    job_active.responsibilities = Set(request.responsibilities.clone());
    job_active.updated_at = Set(Utc::now());

    match job_active.update(&state.db).await {
        Ok(updated_job) => {
            info!("Job with ID {} updated successfully", job_id);
            let response = ApiResponse {
                data: JobResponse::from(updated_job),
                message: "Job updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update job with ID {}: {}", job_id, db_error);
            Err(database_error("Failed to update job"))
        }
    }
}

/// Soft-delete a job posting
#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{job_id}",
    tag = "jobs",
    params(
        ("job_id" = i32, Path, description = "Job ID"),
    ),
    responses(
        (status = 200, description = "Job deactivated successfully", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_job(
    Path(job_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_job function for job_id: {}", job_id);

    let existing_job = match job::Entity::find_by_id(job_id).one(&state.db).await {
        Ok(Some(job_model)) => job_model,
        Ok(None) => {
            warn!("Job with ID {} not found for deletion", job_id);
            return Err(not_found("Job not found"));
        }
        Err(db_error) => {
            error!("Failed to lookup job with ID {} for deletion: {}", job_id, db_error);
            return Err(database_error("Failed to fetch job"));
        }
    };

    // Postings are never hard-deleted; the active flag is flipped instead.
    let mut job_active: job::ActiveModel = existing_job.into();
    job_active.is_active = Set(false);
    job_active.updated_at = Set(Utc::now());

    match job_active.update(&state.db).await {
        Ok(_) => {
            info!("Job with ID {} deactivated", job_id);
            let response = ApiResponse {
                data: format!("Job {job_id} deactivated"),
                message: "Job deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to deactivate job with ID {}: {}", job_id, db_error);
            Err(database_error("Failed to delete job"))
        }
    }
}

/// Get all job postings including inactive ones (administrative listing)
#[utoipa::path(
    get,
    path = "/api/v1/admin/jobs",
    tag = "jobs",
    responses(
        (status = 200, description = "All jobs retrieved successfully", body = ApiResponse<Vec<JobResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn list_all_jobs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<JobResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering list_all_jobs function");

    match job::Entity::find()
        .order_by_desc(job::Column::CreatedAt)
        .order_by_desc(job::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(jobs) => {
            info!("Successfully retrieved {} jobs (including inactive)", jobs.len());
            let job_responses: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();

            let response = ApiResponse {
                data: job_responses,
                message: "All jobs retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve all jobs from database: {}", db_error);
            Err(database_error("Failed to fetch jobs"))
        }
    }
}
