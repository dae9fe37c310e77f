//! Mapping of engine errors onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tg_core::errors::DomainError;
use tg_shared::errors::{error_codes, ErrorResponse};
use tracing::error;

/// Error returned by every handler and by the authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, invalid, expired or revoked token, or no user behind it
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A user filter refused the request
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Token(_) => ApiError::Unauthenticated,
            DomainError::FilterRejected { message } => ApiError::Forbidden(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Unauthenticated => ErrorResponse::unauthenticated(),
            ApiError::InvalidCredentials => ErrorResponse::new(
                error_codes::INVALID_CREDENTIALS,
                "The provided credentials are incorrect",
            ),
            ApiError::Forbidden(message) => ErrorResponse::new(error_codes::FORBIDDEN, message),
            ApiError::BadRequest(message) => ErrorResponse::new(error_codes::BAD_REQUEST, message),
            ApiError::Internal(message) => {
                // Details stay in the log
                error!("Internal error: {}", message);
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
