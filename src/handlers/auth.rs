use std::sync::Arc;

use axum::{Extension, extract::State, response::Json};
use axum_valid::Valid;
use model::entities::user;
use sea_orm::{ActiveEnum, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{self, AuthError};
use crate::schemas::{ApiResponse, AppState};

/// Request body for the administrative login
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// Administrator username
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Administrator password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Issued token plus the actor it identifies
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Actor representation returned by the auth endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role.to_value(),
        }
    }
}

/// Authenticate the administrative credential pair and issue a signed token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials", body = crate::schemas::ErrorResponse),
        (status = 401, description = "Administrator account not provisioned", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn login(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<LoginRequest>>,
) -> Result<Json<ApiResponse<LoginResponse>>, AuthError> {
    trace!("Entering login function");
    debug!("Login attempt for username: {}", request.username);

    // The configured credential pair is the source of truth; the stored hash
    // on the seeded account is never compared against.
    if request.username != state.auth.admin_username
        || request.password != state.auth.admin_password
    {
        warn!("Invalid credentials for username: {}", request.username);
        return Err(AuthError::InvalidCredentials);
    }

    // Resolve the seeded account so the token embeds the real actor identity.
    let actor = user::Entity::find()
        .filter(user::Column::Username.eq(&request.username))
        .one(&state.db)
        .await
        .map_err(|db_error| {
            error!("Failed to resolve administrator account: {}", db_error);
            AuthError::ActorNotFound
        })?
        .ok_or_else(|| {
            error!(
                "Administrator account '{}' is not provisioned",
                request.username
            );
            AuthError::ActorNotFound
        })?;

    let token = auth::issue_token(&state.auth, &actor)?;

    info!("Login successful for username: {}", actor.username);
    let response = ApiResponse {
        data: LoginResponse {
            token,
            user: UserResponse::from(actor),
        },
        message: "Login successful".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Return the actor resolved from the presented token
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current actor retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(actor))]
pub async fn me(
    Extension(actor): Extension<Arc<user::Model>>,
) -> Json<ApiResponse<UserResponse>> {
    let response = ApiResponse {
        data: UserResponse::from((*actor).clone()),
        message: "Current user retrieved successfully".to_string(),
        success: true,
    };
    Json(response)
}
