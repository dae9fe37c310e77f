//! Domain-specific error types and error handling.

mod types;


pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
///
/// Token validation failures are normally reported as a
/// [`ValidationResult`](crate::domain::ValidationResult) verdict; they only
/// appear here through [`TokenError`] where a hard error is the right shape
/// (codec calls, `into_result`).
#[derive(Error, Debug)]
pub enum DomainError {
    /// Required configuration is missing; fatal at startup
    #[error("Configuring error: {message}")]
    Configuring { message: String },

    /// A registered user filter aborted resolution
    #[error("Filter rejected: {message}")]
    FilterRejected { message: String },

    /// The cache collaborator failed
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// The user provider collaborator failed
    #[error("User provider error: {message}")]
    UserProvider { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to token errors
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn configuring(message: impl Into<String>) -> Self {
        DomainError::Configuring {
            message: message.into(),
        }
    }

    pub fn filter_rejected(message: impl Into<String>) -> Self {
        DomainError::FilterRejected {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        DomainError::Cache {
            message: message.into(),
        }
    }

    pub fn user_provider(message: impl Into<String>) -> Self {
        DomainError::UserProvider {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
