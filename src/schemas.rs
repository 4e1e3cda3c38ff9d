use axum::{Json, http::StatusCode};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::auth::AuthConfig;
use crate::storage::ResumeStore;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Resume file storage rooted at the upload directory
    pub storage: ResumeStore,
    /// Token issuance and admin credential configuration
    pub auth: AuthConfig,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// 400 response carrying a field-level validation message
pub fn validation_error(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
}

/// 404 response for an unknown identifier
pub fn not_found(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", message)
}

/// 500 response for an unexpected persistence failure
pub fn database_error(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", message)
}

/// 500 response for a file storage failure
pub fn storage_error(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message)
}

fn error_response(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::login,
        crate::handlers::auth::me,
        crate::handlers::jobs::list_jobs,
        crate::handlers::jobs::get_job,
        crate::handlers::jobs::create_job,
        crate::handlers::jobs::update_job,
        crate::handlers::jobs::delete_job,
        crate::handlers::jobs::list_all_jobs,
        crate::handlers::applications::submit_application,
        crate::handlers::applications::list_applications,
        crate::handlers::applications::update_application,
        crate::handlers::applications::delete_application,
        crate::handlers::applications::download_resume,
    ),
    components(
        schemas(
            ApiResponse<crate::handlers::jobs::JobResponse>,
            ApiResponse<Vec<crate::handlers::jobs::JobResponse>>,
            ApiResponse<crate::handlers::applications::ApplicationResponse>,
            ApiResponse<Vec<crate::handlers::applications::ApplicationResponse>>,
            ApiResponse<crate::handlers::applications::SubmissionReceipt>,
            ApiResponse<crate::handlers::auth::LoginResponse>,
            ApiResponse<crate::handlers::auth::UserResponse>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::LoginResponse,
            crate::handlers::auth::UserResponse,
            crate::handlers::jobs::CreateJobRequest,
            crate::handlers::jobs::UpdateJobRequest,
            crate::handlers::jobs::JobResponse,
            crate::handlers::applications::ApplicationResponse,
            crate::handlers::applications::SubmissionReceipt,
            crate::handlers::applications::UpdateApplicationRequest,
            crate::handlers::applications::ApplicationQuery,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Administrative login and token verification"),
        (name = "jobs", description = "Job catalog endpoints"),
        (name = "applications", description = "Application intake and review endpoints"),
    ),
    info(
        title = "JobDesk API",
        description = "Job board backend - public job catalog, application intake with resume upload, and administrative review",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
