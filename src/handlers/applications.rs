use axum::{
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use model::entities::application;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, DbErr, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

use crate::schemas::{
    ApiResponse, AppState, ErrorResponse, database_error, not_found, storage_error,
    validation_error,
};
use crate::storage::{MAX_RESUME_BYTES, ResumeStore, content_type_for};

/// Application response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: i32,
    /// Public-facing tracking identifier handed back to the applicant
    pub tracking_id: String,
    pub job_id: Option<i32>,
    pub job_title: String,
    pub job_company: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub cover_letter: Option<String>,
    pub resume_filename: String,
    pub status: String,
    pub notes: Option<String>,
    pub applied_at: DateTime<Utc>,
}

impl From<application::Model> for ApplicationResponse {
    fn from(model: application::Model) -> Self {
        Self {
            id: model.id,
            tracking_id: model.tracking_id,
            job_id: model.job_id,
            job_title: model.job_title,
            job_company: model.job_company,
            applicant_name: model.applicant_name,
            applicant_email: model.applicant_email,
            applicant_phone: model.applicant_phone,
            cover_letter: model.cover_letter,
            resume_filename: model.resume_filename,
            status: model.status.to_value(),
            notes: model.notes,
            applied_at: model.applied_at,
        }
    }
}

/// Receipt returned to an applicant after a successful submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionReceipt {
    /// Tracking identifier to reference the submission with
    pub application_id: String,
    pub application: ApplicationResponse,
}

/// Request body for updating the review state of an application
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateApplicationRequest {
    /// One of pending, reviewed, accepted, rejected
    pub status: String,
    /// Reviewer notes; replaces the stored value unconditionally
    pub notes: Option<String>,
}

/// Query parameters for listing applications
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ApplicationQuery {
    /// Filter by denormalized job title (exact match)
    pub job_title: Option<String>,
    /// Filter by review status (exact match)
    pub status: Option<String>,
    /// Case-insensitive substring over applicant name, email and tracking id
    pub search: Option<String>,
}

/// Parse a status string into the entity enum
fn parse_status(value: &str) -> Result<application::ApplicationStatus, String> {
    match value {
        "pending" => Ok(application::ApplicationStatus::Pending),
        "reviewed" => Ok(application::ApplicationStatus::Reviewed),
        "accepted" => Ok(application::ApplicationStatus::Accepted),
        "rejected" => Ok(application::ApplicationStatus::Rejected),
        other => Err(format!("Unknown status: {other}")),
    }
}

/// Generate the public-facing tracking identifier.
/// Millisecond timestamp plus a fixed-width random component, so two
/// submissions in the same millisecond cannot collide; the column also
/// carries a unique index.
fn generate_tracking_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = rand::random::<u32>() % 1_000_000;
    format!("APP{millis}{suffix:06}")
}

async fn find_by_tracking_id(
    db: &DatabaseConnection,
    tracking_id: &str,
) -> Result<Option<application::Model>, DbErr> {
    application::Entity::find()
        .filter(application::Column::TrackingId.eq(tracking_id))
        .one(db)
        .await
}

/// Submit a job application with a resume upload
#[utoipa::path(
    post,
    path = "/api/v1/applications/apply",
    tag = "applications",
    responses(
        (status = 201, description = "Application submitted successfully", body = ApiResponse<SubmissionReceipt>),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Storage or persistence failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn submit_application(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionReceipt>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering submit_application function");

    let mut name = String::new();
    let mut email = String::new();
    let mut phone = String::new();
    let mut cover_letter = String::new();
    let mut job_title = String::new();
    let mut job_company = String::new();
    let mut job_id_raw = String::new();
    let mut resume: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|multipart_error| {
            validation_error(format!("Malformed multipart request: {multipart_error}"))
        })?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => name = read_text_field(field, "name").await?,
            "email" => email = read_text_field(field, "email").await?,
            "phone" => phone = read_text_field(field, "phone").await?,
            "coverLetter" => cover_letter = read_text_field(field, "coverLetter").await?,
            "jobTitle" => job_title = read_text_field(field, "jobTitle").await?,
            "jobCompany" => job_company = read_text_field(field, "jobCompany").await?,
            "jobId" => job_id_raw = read_text_field(field, "jobId").await?,
            "resume" => {
                let original_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(|multipart_error| {
                    validation_error(format!("Failed to read resume upload: {multipart_error}"))
                })?;
                resume = Some((original_name, data.to_vec()));
            }
            _ => {
                // Drain unknown fields so the stream stays consumable
                let _ = field.bytes().await.map_err(|multipart_error| {
                    validation_error(format!("Malformed multipart request: {multipart_error}"))
                })?;
            }
        }
    }

    if name.trim().is_empty() || email.trim().is_empty() || phone.trim().is_empty() {
        warn!("Rejected application with missing applicant fields");
        return Err(validation_error("Name, email, phone, and resume are required"));
    }
    let Some((original_name, data)) = resume else {
        warn!("Rejected application without a resume upload");
        return Err(validation_error("Name, email, phone, and resume are required"));
    };

    let Some(extension) = ResumeStore::allowed_extension(&original_name) else {
        warn!("Rejected resume '{}' with unsupported extension", original_name);
        return Err(validation_error("Only PDF, DOC, and DOCX files are allowed"));
    };

    if data.len() > MAX_RESUME_BYTES {
        warn!(
            "Rejected resume of {} bytes (limit is {} bytes)",
            data.len(),
            MAX_RESUME_BYTES
        );
        return Err(validation_error("Resume file exceeds the 5 MiB limit"));
    }

    let job_id = if job_id_raw.trim().is_empty() {
        None
    } else {
        match job_id_raw.trim().parse::<i32>() {
            Ok(id) => Some(id),
            Err(_) => return Err(validation_error("Invalid job id")),
        }
    };

    // The file write strictly precedes the row insert; a record must never
    // reference a resume that was not stored first.
    let filename = state.storage.generate_filename(&extension);
    if let Err(io_error) = state.storage.save(&filename, &data).await {
        error!("Failed to store resume file {}: {}", filename, io_error);
        return Err(storage_error("Failed to store resume file"));
    }

    let tracking_id = generate_tracking_id();
    debug!(
        "Storing application {} with resume {}",
        tracking_id, filename
    );

    let new_application = application::ActiveModel {
        tracking_id: Set(tracking_id.clone()),
        job_id: Set(job_id),
        job_title: Set(job_title),
        job_company: Set(job_company),
        applicant_name: Set(name),
        applicant_email: Set(email),
        applicant_phone: Set(phone),
        cover_letter: Set(if cover_letter.is_empty() {
            None
        } else {
            Some(cover_letter)
        }),
        resume_filename: Set(filename.clone()),
        status: Set(application::ApplicationStatus::Pending),
        notes: Set(None),
        applied_at: Set(Utc::now()),
        ..Default::default()
    };

    match new_application.insert(&state.db).await {
        Ok(application_model) => {
            info!(
                "Application {} submitted successfully",
                application_model.tracking_id
            );
            let response = ApiResponse {
                data: SubmissionReceipt {
                    application_id: application_model.tracking_id.clone(),
                    application: ApplicationResponse::from(application_model),
                },
                message: "Application submitted successfully!".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to save application {}: {}", tracking_id, db_error);
            // The resume was already written; roll the side effect back
            // before reporting the failure.
            if let Err(io_error) = state.storage.remove(&filename).await {
                error!(
                    "Failed to remove orphaned resume file {}: {}",
                    filename, io_error
                );
            }
            Err(database_error("Failed to save application"))
        }
    }
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    field.text().await.map_err(|multipart_error| {
        validation_error(format!("Failed to read field '{name}': {multipart_error}"))
    })
}

/// Get all applications, optionally filtered, newest first
#[utoipa::path(
    get,
    path = "/api/v1/applications",
    tag = "applications",
    params(ApplicationQuery),
    responses(
        (status = 200, description = "Applications retrieved successfully", body = ApiResponse<Vec<ApplicationResponse>>),
        (status = 400, description = "Invalid filter value", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn list_applications(
    Query(query): Query<ApplicationQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ApplicationResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering list_applications function");
    debug!("Listing applications with filters: {:?}", query);

    let mut query_builder = application::Entity::find();

    if let Some(job_title) = &query.job_title {
        query_builder =
            query_builder.filter(application::Column::JobTitle.eq(job_title.clone()));
    }

    if let Some(status_raw) = &query.status {
        match parse_status(status_raw) {
            Ok(status) => {
                query_builder = query_builder.filter(application::Column::Status.eq(status));
            }
            Err(parse_error) => return Err(validation_error(parse_error)),
        }
    }

    if let Some(term) = &query.search {
        let needle = format!("%{}%", term.to_lowercase());
        let condition = Condition::any()
            .add(
                Expr::expr(Func::lower(Expr::col(application::Column::ApplicantName)))
                    .like(needle.clone()),
            )
            .add(
                Expr::expr(Func::lower(Expr::col(application::Column::ApplicantEmail)))
                    .like(needle.clone()),
            )
            .add(
                Expr::expr(Func::lower(Expr::col(application::Column::TrackingId)))
                    .like(needle),
            );
        query_builder = query_builder.filter(condition);
    }

    match query_builder
        .order_by_desc(application::Column::AppliedAt)
        .order_by_desc(application::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(applications) => {
            info!("Successfully retrieved {} applications", applications.len());
            let application_responses: Vec<ApplicationResponse> = applications
                .into_iter()
                .map(ApplicationResponse::from)
                .collect();

            let response = ApiResponse {
                data: application_responses,
                message: "Applications retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve applications: {}", db_error);
            Err(database_error("Failed to fetch applications"))
        }
    }
}

/// Overwrite the review status and notes of an application
#[utoipa::path(
    put,
    path = "/api/v1/applications/{tracking_id}",
    tag = "applications",
    params(
        ("tracking_id" = String, Path, description = "Application tracking identifier"),
    ),
    request_body = UpdateApplicationRequest,
    responses(
        (status = 200, description = "Application updated successfully", body = ApiResponse<ApplicationResponse>),
        (status = 400, description = "Unknown status value", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_application(
    Path(tracking_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<ApiResponse<ApplicationResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_application function for {}", tracking_id);

    let status = match parse_status(&request.status) {
        Ok(status) => status,
        Err(parse_error) => return Err(validation_error(parse_error)),
    };

    let existing = match find_by_tracking_id(&state.db, &tracking_id).await {
        Ok(Some(application_model)) => application_model,
        Ok(None) => {
            warn!("Application {} not found for update", tracking_id);
            return Err(not_found("Application not found"));
        }
        Err(db_error) => {
            error!("Failed to lookup application {}: {}", tracking_id, db_error);
            return Err(database_error("Failed to fetch application"));
        }
    };

    // Status and notes are overwritten unconditionally; there is no
    // transition restriction within the enum.
    let mut application_active: application::ActiveModel = existing.into();
    application_active.status = Set(status);
    application_active.notes = Set(request.notes.clone());

    match application_active.update(&state.db).await {
        Ok(updated) => {
            info!(
                "Application {} updated to status '{}'",
                tracking_id, request.status
            );
            let response = ApiResponse {
                data: ApplicationResponse::from(updated),
                message: "Status updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update application {}: {}", tracking_id, db_error);
            Err(database_error("Failed to update status"))
        }
    }
}

/// Hard-delete an application and its stored resume
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{tracking_id}",
    tag = "applications",
    params(
        ("tracking_id" = String, Path, description = "Application tracking identifier"),
    ),
    responses(
        (status = 200, description = "Application deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_application(
    Path(tracking_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_application function for {}", tracking_id);

    let existing = match find_by_tracking_id(&state.db, &tracking_id).await {
        Ok(Some(application_model)) => application_model,
        Ok(None) => {
            warn!("Application {} not found for deletion", tracking_id);
            return Err(not_found("Application not found"));
        }
        Err(db_error) => {
            error!("Failed to lookup application {}: {}", tracking_id, db_error);
            return Err(database_error("Failed to fetch application"));
        }
    };

    let filename = existing.resume_filename.clone();

    match application::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await
    {
        Ok(_) => {
            // The row is gone; remove the stored file too so no orphan is
            // left behind. A failed cleanup is logged, never surfaced.
            if let Err(io_error) = state.storage.remove(&filename).await {
                warn!(
                    "Failed to remove resume file {} after delete: {}",
                    filename, io_error
                );
            }
            info!("Application {} deleted", tracking_id);
            let response = ApiResponse {
                data: format!("Application {tracking_id} deleted"),
                message: "Application deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to delete application {}: {}", tracking_id, db_error);
            Err(database_error("Failed to delete application"))
        }
    }
}

/// Serve the stored resume file for an application
#[utoipa::path(
    get,
    path = "/api/v1/applications/{tracking_id}/resume",
    tag = "applications",
    params(
        ("tracking_id" = String, Path, description = "Application tracking identifier"),
    ),
    responses(
        (status = 200, description = "Resume file bytes"),
        (status = 404, description = "Application or file not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn download_resume(
    Path(tracking_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering download_resume function for {}", tracking_id);

    let existing = match find_by_tracking_id(&state.db, &tracking_id).await {
        Ok(Some(application_model)) => application_model,
        Ok(None) => {
            warn!("Application {} not found for resume download", tracking_id);
            return Err(not_found("Application not found"));
        }
        Err(db_error) => {
            error!("Failed to lookup application {}: {}", tracking_id, db_error);
            return Err(database_error("Failed to fetch application"));
        }
    };

    let extension = std::path::Path::new(&existing.resume_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match state.storage.read(&existing.resume_filename).await {
        Ok(data) => {
            debug!(
                "Serving resume {} ({} bytes)",
                existing.resume_filename,
                data.len()
            );
            Ok(([(header::CONTENT_TYPE, content_type_for(extension))], data))
        }
        Err(io_error) => {
            warn!(
                "Resume file {} missing from storage: {}",
                existing.resume_filename, io_error
            );
            Err(not_found("Resume file not found"))
        }
    }
}
