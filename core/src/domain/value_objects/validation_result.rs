//! Outcome of validating a token string.

use std::fmt;

use crate::domain::entities::ClaimSet;
use crate::errors::TokenError;

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// No token text at all
    Empty,
    /// Structure, header or signature did not check out
    BadSignature,
    /// `sub`, `jti` or `exp` is absent
    MissingClaims,
    /// `iss` or `aud` differs from the configured value
    IssuerOrAudienceMismatch,
    /// Outside the `nbf`..`exp` window
    Expired,
    /// Invalidated by id or by subject-wide logout
    Revoked,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::Empty => "empty",
            InvalidReason::BadSignature => "bad_signature",
            InvalidReason::MissingClaims => "missing_claims",
            InvalidReason::IssuerOrAudienceMismatch => "issuer_or_audience_mismatch",
            InvalidReason::Expired => "expired",
            InvalidReason::Revoked => "revoked",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<InvalidReason> for TokenError {
    fn from(reason: InvalidReason) -> Self {
        match reason {
            InvalidReason::Empty => TokenError::MalformedToken,
            InvalidReason::BadSignature => TokenError::SignatureMismatch,
            InvalidReason::MissingClaims => TokenError::MissingClaims,
            InvalidReason::IssuerOrAudienceMismatch => TokenError::IssuerOrAudienceMismatch,
            InvalidReason::Expired => TokenError::Expired,
            InvalidReason::Revoked => TokenError::Revoked,
        }
    }
}

/// Verdict returned by the token validator
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid(ClaimSet),
    Invalid(InvalidReason),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn claims(&self) -> Option<&ClaimSet> {
        match self {
            ValidationResult::Valid(claims) => Some(claims),
            ValidationResult::Invalid(_) => None,
        }
    }

    pub fn into_claims(self) -> Option<ClaimSet> {
        match self {
            ValidationResult::Valid(claims) => Some(claims),
            ValidationResult::Invalid(_) => None,
        }
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(reason) => Some(*reason),
        }
    }

    /// Converts the verdict into a `Result` for callers that want `?`
    pub fn into_result(self) -> Result<ClaimSet, TokenError> {
        match self {
            ValidationResult::Valid(claims) => Ok(claims),
            ValidationResult::Invalid(reason) => Err(reason.into()),
        }
    }
}
