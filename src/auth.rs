use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use model::entities::user;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schemas::ErrorResponse;

pub mod middleware;

/// Issued tokens stay valid for this long; there is no revocation list.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Token issuance and administrative credential configuration.
///
/// The configured credential pair is the source of truth for login. The
/// seeded database account only supplies the actor identity embedded in the
/// token and resolved again on every authenticated request.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "jobdesk_dev_secret".to_string()),
            admin_username: std::env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}

/// Claims embedded in an issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub exp: i64,
}

/// Authentication failures surfaced at the request boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token, authorization denied")]
    MissingToken,
    #[error("Token is not valid")]
    InvalidToken,
    #[error("User not found for this token")]
    ActorNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Failed to issue token")]
    TokenCreation,
}

impl AuthError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthError::ActorNotFound => (StatusCode::UNAUTHORIZED, "ACTOR_NOT_FOUND"),
            AuthError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            AuthError::TokenCreation => (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_CREATION"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            success: false,
        });
        (status, body).into_response()
    }
}

/// Issue a signed token embedding the actor identity, valid for 24 hours.
pub fn issue_token(config: &AuthConfig, actor: &user::Model) -> Result<String, AuthError> {
    let expiration = Utc::now()
        .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
        .ok_or(AuthError::TokenCreation)?
        .timestamp();

    let claims = Claims {
        id: actor.id,
        username: actor.username.clone(),
        role: actor.role.to_value(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|_| AuthError::TokenCreation)
}

/// Decode a token and validate its signature and expiry.
pub fn decode_token(config: &AuthConfig, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::user::UserRole;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
        }
    }

    fn test_actor() -> user::Model {
        user::Model {
            id: 1,
            username: "admin".to_string(),
            email: "admin@jobdesk.local".to_string(),
            password_hash: "seed-hash".to_string(),
            role: UserRole::SuperAdmin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let config = test_config();
        let token = issue_token(&config, &test_actor()).unwrap();

        let claims = decode_token(&config, &token).unwrap();
        assert_eq!(claims.id, 1);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "super_admin");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let config = test_config();
        let token = issue_token(&config, &test_actor()).unwrap();

        let other = AuthConfig {
            jwt_secret: "other-secret".to_string(),
            ..config
        };
        assert!(matches!(
            decode_token(&other, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_decode_rejects_expired_token() {
        let config = test_config();
        let claims = Claims {
            id: 1,
            username: "admin".to_string(),
            role: "super_admin".to_string(),
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            decode_token(&config, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let config = test_config();
        assert!(matches!(
            decode_token(&config, "not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
