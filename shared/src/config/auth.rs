//! Token signing and validation configuration

use serde::{Deserialize, Serialize};

/// Default token lifetime: 30 days
pub const DEFAULT_TTL_SECONDS: i64 = 60 * 60 * 24 * 30;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to sign tokens (HMAC-SHA-512)
    #[serde(default)]
    pub secret: Option<String>,

    /// Token time-to-live in seconds
    #[serde(default = "default_ttl")]
    pub ttl: i64,

    /// Token issuer (identifies this deployment)
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Token audience (identifies the accepted consumer); empty disables the check
    #[serde(default)]
    pub audience: String,

    /// Bind tokens to the concrete principal type they were minted for
    #[serde(default)]
    pub model_safe: bool,

    /// Reject tokens presented before their `nbf` claim
    #[serde(default = "default_validate_nbf")]
    pub validate_nbf: bool,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            ttl: default_ttl(),
            issuer: default_issuer(),
            audience: String::new(),
            model_safe: false,
            validate_nbf: default_validate_nbf(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// `JWT_KEY` falls back to `APP_KEY`, `JWT_ISSUER` falls back to `APP_NAME`.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_KEY")
            .or_else(|_| std::env::var("APP_KEY"))
            .ok()
            .filter(|s| !s.is_empty());
        let ttl = std::env::var("JWT_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECONDS);
        let issuer = std::env::var("JWT_ISSUER")
            .or_else(|_| std::env::var("APP_NAME"))
            .unwrap_or_else(|_| default_issuer());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_default();

        Self {
            secret,
            ttl,
            issuer,
            audience,
            model_safe: env_flag("JWT_MODEL_SAFE", false),
            validate_nbf: env_flag("JWT_VALIDATE_NBF", true),
        }
    }

    /// Set the token lifetime in seconds
    pub fn with_ttl(mut self, seconds: i64) -> Self {
        self.ttl = seconds;
        self
    }

    /// Set issuer and audience
    pub fn with_issuer(mut self, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self.audience = audience.into();
        self
    }

    /// Enable or disable model-safe mode
    pub fn with_model_safe(mut self, enabled: bool) -> Self {
        self.model_safe = enabled;
        self
    }

    /// Check if a usable signing secret is configured
    pub fn has_secret(&self) -> bool {
        self.secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn default_ttl() -> i64 {
    DEFAULT_TTL_SECONDS
}

fn default_issuer() -> String {
    String::from("tokenguard")
}

fn default_validate_nbf() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.ttl, 2_592_000);
        assert_eq!(config.issuer, "tokenguard");
        assert!(config.audience.is_empty());
        assert!(!config.model_safe);
        assert!(config.validate_nbf);
        assert!(!config.has_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_ttl(3600)
            .with_issuer("Acme", "Api")
            .with_model_safe(true);

        assert!(config.has_secret());
        assert_eq!(config.ttl, 3600);
        assert_eq!(config.issuer, "Acme");
        assert_eq!(config.audience, "Api");
        assert!(config.model_safe);
    }

    #[test]
    fn test_empty_secret_is_not_usable() {
        let config = JwtConfig::new("");
        assert!(!config.has_secret());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: JwtConfig = serde_json::from_str(r#"{"secret": "k", "issuer": "Acme"}"#).unwrap();
        assert_eq!(config.secret.as_deref(), Some("k"));
        assert_eq!(config.issuer, "Acme");
        assert_eq!(config.ttl, DEFAULT_TTL_SECONDS);
        assert!(config.validate_nbf);
    }
}
