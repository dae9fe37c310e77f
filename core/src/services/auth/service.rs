//! Engine facade bundling issuance, validation, revocation and resolution

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tg_shared::config::JwtConfig;

use crate::domain::{ClaimSet, Clock, Principal, SystemClock, ValidationResult};
use crate::errors::DomainResult;
use crate::repositories::{CacheStore, UserProvider};
use crate::services::revocation::RevocationLedger;
use crate::services::token::{ClaimsCodec, JwtSettings, TokenIssuer, TokenValidator};

use super::filter::UserFilter;
use super::resolver::UserResolver;

/// Token authentication engine for principals of type `U`
///
/// Built once at startup. Filters are registered through `&mut self`, so the
/// list is frozen as soon as the engine is shared behind an `Arc`.
pub struct JwtAuth<U> {
    settings: Arc<JwtSettings>,
    issuer: TokenIssuer,
    validator: Arc<TokenValidator>,
    ledger: Arc<RevocationLedger>,
    resolver: UserResolver<U>,
}

impl<U> JwtAuth<U>
where
    U: Principal + Serialize + DeserializeOwned + 'static,
{
    /// Creates the engine using the wall clock
    ///
    /// # Errors
    /// `DomainError::Configuring` if no signing secret is configured.
    pub fn new(config: &JwtConfig, cache: Arc<dyn CacheStore>) -> DomainResult<Self> {
        Self::with_clock(config, cache, Arc::new(SystemClock))
    }

    /// Creates the engine with an explicit time source
    pub fn with_clock(
        config: &JwtConfig,
        cache: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> DomainResult<Self> {
        let settings = Arc::new(JwtSettings::from_config(config)?);
        let codec = Arc::new(ClaimsCodec::new(settings.secret()));

        let ledger = Arc::new(RevocationLedger::new(
            Arc::clone(&cache),
            settings.cache_ttl_minutes(),
            Arc::clone(&clock),
        ));
        let issuer = TokenIssuer::new(Arc::clone(&codec), Arc::clone(&settings), Arc::clone(&clock));
        let validator = Arc::new(TokenValidator::new(
            codec,
            Arc::clone(&settings),
            Arc::clone(&ledger),
            clock,
        ));
        let resolver = UserResolver::new(Arc::clone(&validator), cache, Arc::clone(&settings));

        Ok(Self {
            settings,
            issuer,
            validator,
            ledger,
            resolver,
        })
    }

    /// Appends a post-resolution filter
    pub fn register_filter(&mut self, filter: impl UserFilter<U> + 'static) {
        self.resolver.register_filter(filter);
    }

    /// Builder-style [`register_filter`](Self::register_filter)
    pub fn with_filter(mut self, filter: impl UserFilter<U> + 'static) -> Self {
        self.register_filter(filter);
        self
    }

    pub fn settings(&self) -> &JwtSettings {
        &self.settings
    }

    /// Issues a token for `principal` with optional extra claims
    pub fn generate_token(
        &self,
        principal: &dyn Principal,
        custom_claims: ClaimSet,
    ) -> DomainResult<String> {
        self.issuer.generate_token(principal, custom_claims)
    }

    pub async fn validate(&self, token: &str) -> ValidationResult {
        self.validator.validate(token).await
    }

    pub async fn is_token_valid(&self, token: &str) -> bool {
        self.validate(token).await.is_valid()
    }

    /// Claims of a fully valid token; an empty set for anything else
    ///
    /// Filters and user lookup are not involved.
    pub async fn retrieve_claims(&self, token: &str) -> ClaimSet {
        self.validate(token).await.into_claims().unwrap_or_default()
    }

    /// Resolves the user behind `token` through `provider`, using the user cache
    pub async fn retrieve_user<P>(&self, token: &str, provider: &P) -> DomainResult<Option<U>>
    where
        P: UserProvider<User = U> + ?Sized,
    {
        self.resolver.resolve(token, provider).await
    }

    /// Resolves the user for claims returned by a previous [`validate`](Self::validate)
    pub async fn retrieve_user_for_claims<P>(
        &self,
        claims: &ClaimSet,
        provider: &P,
    ) -> DomainResult<Option<U>>
    where
        P: UserProvider<User = U> + ?Sized,
    {
        self.resolver.resolve_claims(claims, provider).await
    }

    /// Revokes one token by its `jti`
    pub async fn invalidate(&self, jti: &str) -> DomainResult<()> {
        self.ledger.invalidate_token(jti).await
    }

    /// Revokes every token issued to `subject` so far and drops its cached user
    pub async fn logout(&self, subject: &str) -> DomainResult<()> {
        self.ledger.logout_subject(subject).await?;
        self.resolver.clear_cache(subject).await
    }

    /// Drops the cached user for `subject`
    pub async fn clear_cache(&self, subject: &str) -> DomainResult<()> {
        self.resolver.clear_cache(subject).await
    }
}
