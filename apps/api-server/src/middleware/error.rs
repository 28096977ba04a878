//! Error handling - translates every failure into an RFC 7807 response.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use tinta_core::error::RepoError;
use tinta_core::ports::{AuthError, StorageError};
use tinta_shared::ErrorResponse;

/// Application-level error type.
///
/// Conflicts map to 400, not 409: duplicate username/email registrations
/// have always been reported as a plain bad request to the client.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Missing/invalid input, with the offending field names.
    Validation(Vec<String>),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(fields) => write!(f, "Missing fields: {}", fields.join(", ")),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(fields) => ErrorResponse::new(400, "Validation Failed")
                .with_detail(format!("Missing fields: {}", fields.join(", "))),
            AppError::Conflict(detail) => ErrorResponse::new(400, "Conflict").with_detail(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(constraint) => {
                // The migration names the unique indexes after their column,
                // so the constraint tells us which field collided.
                if constraint.contains("email") {
                    AppError::Conflict("A user with this email already exists".to_string())
                } else if constraint.contains("username") {
                    AppError::Conflict("A user with this username already exists".to_string())
                } else {
                    AppError::Conflict(constraint)
                }
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingSession | AuthError::SessionExpired | AuthError::InvalidSession(_) => {
                AppError::Forbidden("Not signed in".to_string())
            }
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnsupportedFormat(name) => {
                AppError::BadRequest(format!("Unsupported file format: {}", name))
            }
            StorageError::InvalidPath(path) => AppError::NotFound(format!("No such file: {path}")),
            StorageError::Io(msg) => {
                tracing::error!("Media storage error: {}", msg);
                AppError::Internal("Storage error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
