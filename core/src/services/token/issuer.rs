//! Token issuance

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::claims::{AUD, EXP, IAT, IAT_MICROS, ISS, JTI, MODEL, NBF, SUB};
use crate::domain::{ClaimSet, Clock, Principal, MICROS_PER_SECOND};
use crate::errors::{DomainResult, TokenError};

use super::codec::ClaimsCodec;
use super::config::JwtSettings;

/// Builds canonical claim sets and signs them
pub struct TokenIssuer {
    codec: Arc<ClaimsCodec>,
    settings: Arc<JwtSettings>,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(codec: Arc<ClaimsCodec>, settings: Arc<JwtSettings>, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec,
            settings,
            clock,
        }
    }

    /// Issues a signed token for `principal`
    ///
    /// `custom_claims` are merged over the canonical claims, so a custom claim
    /// named like a registered one (`exp`, `sub`, ...) replaces it. In
    /// model-safe mode the `model` claim is written last and always reflects
    /// the principal's real type.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact token
    /// * `Err(DomainError::Token)` - Expiry out of range or signing failed
    pub fn generate_token(
        &self,
        principal: &dyn Principal,
        custom_claims: ClaimSet,
    ) -> DomainResult<String> {
        let claims = self.build_claims(principal, custom_claims)?;
        let token = self.codec.encode(&claims)?;
        debug!(
            sub = ?claims.subject(),
            jti = ?claims.jti(),
            exp = ?claims.expires_at(),
            "Issued token"
        );
        Ok(token)
    }

    /// Claim set that [`generate_token`](Self::generate_token) would sign
    pub fn build_claims(
        &self,
        principal: &dyn Principal,
        custom_claims: ClaimSet,
    ) -> DomainResult<ClaimSet> {
        let now_micros = self.clock.now_micros();
        let now = now_micros.div_euclid(MICROS_PER_SECOND);
        let expires_at = now.checked_add(self.settings.ttl).ok_or_else(|| {
            TokenError::GenerationFailed {
                message: format!("expiry overflows with ttl {}", self.settings.ttl),
            }
        })?;

        let mut claims = ClaimSet::new()
            .with(SUB, principal.auth_identifier())
            .with(ISS, self.settings.issuer.clone())
            .with(AUD, self.settings.audience.clone())
            .with(EXP, expires_at)
            .with(IAT, now)
            .with(IAT_MICROS, now_micros)
            .with(NBF, now)
            .with(JTI, Uuid::new_v4().to_string());

        // A custom `iat` alone must not be shadowed by the precise issue time
        let overrides_issue_time =
            custom_claims.contains(IAT) && !custom_claims.contains(IAT_MICROS);
        claims.merge(custom_claims);
        if overrides_issue_time {
            claims.remove(IAT_MICROS);
        }

        if self.settings.model_safe {
            claims.insert(MODEL, principal.type_name());
        }

        Ok(claims)
    }
}
