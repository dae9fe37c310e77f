//! Token validation

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{ClaimSet, Clock, InvalidReason, ValidationResult};
use crate::services::revocation::RevocationLedger;

use super::codec::ClaimsCodec;
use super::config::JwtSettings;

/// Runs every check a token must pass before any of its claims is trusted
pub struct TokenValidator {
    codec: Arc<ClaimsCodec>,
    settings: Arc<JwtSettings>,
    ledger: Arc<RevocationLedger>,
    clock: Arc<dyn Clock>,
}

impl TokenValidator {
    pub fn new(
        codec: Arc<ClaimsCodec>,
        settings: Arc<JwtSettings>,
        ledger: Arc<RevocationLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            codec,
            settings,
            ledger,
            clock,
        }
    }

    /// Validates `token`, stopping at the first failed check
    ///
    /// Order: non-empty, signature, required claims (`sub`, `jti`, `exp`),
    /// issuer/audience, validity window, revocation. A revocation lookup that
    /// fails counts as revoked.
    pub async fn validate(&self, token: &str) -> ValidationResult {
        let verdict = self.check(token).await;
        if let ValidationResult::Invalid(reason) = &verdict {
            debug!(%reason, "Token rejected");
        }
        verdict
    }

    async fn check(&self, token: &str) -> ValidationResult {
        if token.is_empty() {
            return ValidationResult::Invalid(InvalidReason::Empty);
        }

        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(_) => return ValidationResult::Invalid(InvalidReason::BadSignature),
        };

        let Some(exp) = claims.expires_at() else {
            return ValidationResult::Invalid(InvalidReason::MissingClaims);
        };
        if claims.subject().is_none() || claims.jti().is_none() {
            return ValidationResult::Invalid(InvalidReason::MissingClaims);
        }

        if !self.issuer_and_audience_match(&claims) {
            return ValidationResult::Invalid(InvalidReason::IssuerOrAudienceMismatch);
        }

        let now = self.clock.now();
        if now >= exp {
            return ValidationResult::Invalid(InvalidReason::Expired);
        }
        if self.settings.validate_nbf && claims.not_before().is_some_and(|nbf| now < nbf) {
            return ValidationResult::Invalid(InvalidReason::Expired);
        }

        match self.ledger.is_revoked(&claims).await {
            Ok(false) => ValidationResult::Valid(claims),
            Ok(true) => ValidationResult::Invalid(InvalidReason::Revoked),
            Err(e) => {
                warn!(error = %e, "Revocation lookup failed; rejecting token");
                ValidationResult::Invalid(InvalidReason::Revoked)
            }
        }
    }

    fn issuer_and_audience_match(&self, claims: &ClaimSet) -> bool {
        let issuer = &self.settings.issuer;
        if !issuer.is_empty() && claims.issuer() != Some(issuer.as_str()) {
            return false;
        }

        let audience = &self.settings.audience;
        audience.is_empty() || claims.audiences().contains(&audience.as_str())
    }
}
