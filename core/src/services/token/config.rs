//! Validated settings for the token services

use tg_shared::config::JwtConfig;

use crate::errors::{DomainError, DomainResult};

/// Longest accepted token lifetime: ten years
pub const MAX_TTL_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// Token settings checked once at startup and read-only afterwards
#[derive(Clone)]
pub struct JwtSettings {
    secret: String,
    /// Token lifetime in seconds
    pub ttl: i64,
    pub issuer: String,
    /// Empty means the audience claim is not checked
    pub audience: String,
    pub model_safe: bool,
    pub validate_nbf: bool,
}

impl JwtSettings {
    /// Builds settings from configuration
    ///
    /// A configuration without a `jwt` section deserializes to defaults that
    /// carry no secret, so it fails here too.
    ///
    /// # Errors
    /// `DomainError::Configuring` when no (non-empty) signing secret is
    /// configured or the ttl is not in `1..=MAX_TTL_SECONDS`.
    pub fn from_config(config: &JwtConfig) -> DomainResult<Self> {
        let secret = config
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::configuring("token signing secret is not configured"))?;

        if !(1..=MAX_TTL_SECONDS).contains(&config.ttl) {
            return Err(DomainError::configuring(format!(
                "token ttl must be between 1 and {} seconds, got {}",
                MAX_TTL_SECONDS, config.ttl
            )));
        }

        Ok(Self {
            secret: secret.to_string(),
            ttl: config.ttl,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            model_safe: config.model_safe,
            validate_nbf: config.validate_nbf,
        })
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Cache TTL for revocation markers and cached users
    ///
    /// The cache works in whole minutes; rounding up keeps every entry alive
    /// for at least as long as a token that could reference it.
    pub fn cache_ttl_minutes(&self) -> u64 {
        let minutes = (self.ttl.max(0) as u64).div_ceil(60);
        minutes.max(1)
    }
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("model_safe", &self.model_safe)
            .field("validate_nbf", &self.validate_nbf)
            .finish()
    }
}
