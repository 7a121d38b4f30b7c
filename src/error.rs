// src/error.rs

use crate::auth::credentials::PasswordError;
use crate::auth::jwt::JwtError;
use crate::db::error::RepositoryError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use qna_board_api::ErrorResponse;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    // === Ressources ===
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Validation error: {0}")]
    Validation(String),

    // === Authentification ===
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Malformed Authorization header")]
    MalformedAuthHeader,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Email not verified")]
    EmailNotVerified,
    #[error("Password login unavailable")]
    PasswordLoginUnavailable,
    #[error("Verification link expired")]
    VerificationExpired,

    // === Collaborateurs externes ===
    #[error("Upstream provider error: {0}")]
    Upstream(String),

    // === Erreurs internes ===
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message, internal_detail) = self.error_info();

        if let Some(ref detail) = internal_detail {
            tracing::error!(error_code, %status, detail, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details: None,
        });

        (status, body).into_response()
    }
}

impl AppError {
    /// Status, stable error code, public message and the detail that is only logged.
    fn error_info(&self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),

            // 401
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
                None,
            ),
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                "Authentication required".to_string(),
                None,
            ),
            AppError::InvalidToken(msg) => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", msg.clone(), None)
            }
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Access token expired".to_string(),
                None,
            ),

            // 400
            AppError::MalformedAuthHeader => (
                StatusCode::BAD_REQUEST,
                "INVALID_TOKEN_FORMAT",
                "Authorization header must be 'Bearer <token>'".to_string(),
                None,
            ),

            // 403
            AppError::EmailNotVerified => (
                StatusCode::FORBIDDEN,
                "EMAIL_NOT_VERIFIED",
                "Verify your email address before logging in".to_string(),
                None,
            ),
            AppError::PasswordLoginUnavailable => (
                StatusCode::FORBIDDEN,
                "PASSWORD_LOGIN_UNAVAILABLE",
                "This account signs in with an external provider".to_string(),
                None,
            ),

            // 410
            AppError::VerificationExpired => (
                StatusCode::GONE,
                "VERIFICATION_EXPIRED",
                "The verification link has expired, please sign up again".to_string(),
                None,
            ),

            // 502
            AppError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The identity provider could not be reached".to_string(),
                Some(msg.clone()),
            ),

            // 500
            AppError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "An error occurred with the database".to_string(),
                Some(msg.clone()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
                Some(msg.clone()),
            ),
        }
    }

    // === Constructeurs helpers ===
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        AppError::Upstream(msg.into())
    }

    #[cfg(test)]
    pub fn status_code(&self) -> StatusCode {
        self.error_info().0
    }
}

// === Conversions automatiques ===

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AppError::not_found("Resource not found"),
            RepositoryError::UniqueViolation { .. } => {
                AppError::conflict("Resource already exists")
            }
            RepositoryError::ForeignKeyViolation(_) => {
                AppError::not_found("Referenced resource not found")
            }
            RepositoryError::Pool(msg) | RepositoryError::Database(msg) => AppError::database(msg),
        }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        RepositoryError::from(err).into()
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::GenerationFailed(e) => AppError::internal(format!("Token generation failed: {e}")),
            JwtError::Expired => AppError::TokenExpired,
            JwtError::VerificationFailed(_) => AppError::InvalidToken("Invalid token".to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::internal(format!("Blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::MalformedAuthHeader.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmailNotVerified.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::PasswordLoginUnavailable.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::VerificationExpired.status_code(), StatusCode::GONE);
        assert_eq!(AppError::upstream("x").status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::database("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn repository_errors_convert() {
        assert!(matches!(AppError::from(RepositoryError::NotFound), AppError::NotFound(_)));
        assert!(matches!(
            AppError::from(RepositoryError::UniqueViolation {
                constraint: None,
                message: "dup".to_string(),
            }),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::ForeignKeyViolation("fk".to_string())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::Pool("timeout".to_string())),
            AppError::Database(_)
        ));
    }

    #[test]
    fn expired_jwt_maps_to_token_expired() {
        assert!(matches!(AppError::from(JwtError::Expired), AppError::TokenExpired));
    }

    #[tokio::test]
    async fn internal_detail_is_not_returned() {
        let response = AppError::database("password authentication failed for user").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body.error, "DATABASE_ERROR");
        assert!(!body.message.contains("password authentication"));
    }
}
