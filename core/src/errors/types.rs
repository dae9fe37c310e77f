//! Token-level error types

use thiserror::Error;

/// Token encoding, decoding and validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    MalformedToken,

    #[error("Signature mismatch")]
    SignatureMismatch,

    #[error("Token expired")]
    Expired,

    #[error("Issuer or audience mismatch")]
    IssuerOrAudienceMismatch,

    #[error("Missing required claims")]
    MissingClaims,

    #[error("Token revoked")]
    Revoked,

    #[error("Token generation failed: {message}")]
    GenerationFailed { message: String },
}
