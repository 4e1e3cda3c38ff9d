use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use model::entities::user;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::warn;

use crate::auth::{AuthError, decode_token};
use crate::schemas::AppState;

/// Middleware protecting administrative routes.
///
/// Reads the bearer token, validates signature and expiry, then re-resolves
/// the actor by username against the users table so a token for a removed
/// account stops working. The resolved actor is injected as a request
/// extension for handlers that need it.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    let claims = decode_token(&state.auth, token)?;

    let actor = user::Entity::find()
        .filter(user::Column::Username.eq(&claims.username))
        .one(&state.db)
        .await
        .map_err(|db_error| {
            warn!("Failed to resolve actor '{}': {}", claims.username, db_error);
            AuthError::ActorNotFound
        })?
        .ok_or(AuthError::ActorNotFound)?;

    request.extensions_mut().insert(Arc::new(actor));
    Ok(next.run(request).await)
}
