//! Token to user resolution with memoization
//!
//! Cached users are served without re-running filters: filters execute once
//! per cache population, not once per request. A change that filters would
//! react to becomes visible after the entry expires or after
//! [`UserResolver::clear_cache`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{ClaimSet, Principal, ValidationResult};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CacheStore, UserProvider};
use crate::services::token::{JwtSettings, TokenValidator};

use super::filter::{FilterChain, UserFilter};

/// Cache key of a memoized user
pub fn user_cache_key(subject: &str) -> String {
    format!("users:{}", subject)
}

/// Resolves validated tokens to users of type `U`
pub struct UserResolver<U> {
    validator: Arc<TokenValidator>,
    cache: Arc<dyn CacheStore>,
    settings: Arc<JwtSettings>,
    filters: FilterChain<U>,
}

impl<U> UserResolver<U>
where
    U: Principal + Serialize + DeserializeOwned + 'static,
{
    pub fn new(
        validator: Arc<TokenValidator>,
        cache: Arc<dyn CacheStore>,
        settings: Arc<JwtSettings>,
    ) -> Self {
        Self {
            validator,
            cache,
            settings,
            filters: FilterChain::new(),
        }
    }

    /// Appends a filter; filters run in registration order
    pub fn register_filter(&mut self, filter: impl UserFilter<U> + 'static) {
        self.filters.push(filter);
    }

    /// Resolves the user behind `token`
    ///
    /// # Returns
    /// * `Ok(Some(user))` - Token valid and user resolved
    /// * `Ok(None)` - Token invalid, user unknown, model mismatch or filter rejection
    /// * `Err(DomainError)` - A filter, the provider or the cache failed
    pub async fn resolve<P>(&self, token: &str, provider: &P) -> DomainResult<Option<U>>
    where
        P: UserProvider<User = U> + ?Sized,
    {
        match self.validator.validate(token).await {
            ValidationResult::Valid(claims) => self.resolve_claims(&claims, provider).await,
            ValidationResult::Invalid(_) => Ok(None),
        }
    }

    /// Resolves the user for claims that already passed validation
    pub async fn resolve_claims<P>(&self, claims: &ClaimSet, provider: &P) -> DomainResult<Option<U>>
    where
        P: UserProvider<User = U> + ?Sized,
    {
        let Some(subject) = claims.subject() else {
            return Ok(None);
        };
        let key = user_cache_key(&subject);

        let producer = Box::pin(self.load(claims, &subject, provider));
        let cached = self
            .cache
            .remember(&key, self.settings.cache_ttl_minutes(), producer)
            .await?;

        let Some(value) = cached else {
            return Ok(None);
        };
        let user: U = serde_json::from_value(value)
            .map_err(|e| DomainError::cache(format!("unreadable cached user '{}': {}", key, e)))?;

        // Also applies to cache hits: the key is shared by every principal type
        if !self.model_matches(claims, &user) {
            warn!(sub = %subject, "Cached user type does not match token model");
            return Ok(None);
        }
        Ok(Some(user))
    }

    /// Drops the memoized user for `subject`
    pub async fn clear_cache(&self, subject: &str) -> DomainResult<()> {
        self.cache.forget(&user_cache_key(subject)).await
    }

    async fn load<P>(
        &self,
        claims: &ClaimSet,
        subject: &str,
        provider: &P,
    ) -> DomainResult<Option<Value>>
    where
        P: UserProvider<User = U> + ?Sized,
    {
        let Some(user) = provider.retrieve_by_id(subject).await? else {
            debug!(sub = subject, "No user for token subject");
            return Ok(None);
        };

        if !self.model_matches(claims, &user) {
            warn!(sub = subject, "User type does not match token model");
            return Ok(None);
        }

        let Some(user) = self.filters.apply(user)? else {
            debug!(sub = subject, "User rejected by filter");
            return Ok(None);
        };

        serde_json::to_value(&user)
            .map(Some)
            .map_err(|e| DomainError::Internal {
                message: format!("failed to serialize user for cache: {}", e),
            })
    }

    fn model_matches(&self, claims: &ClaimSet, user: &U) -> bool {
        !self.settings.model_safe || claims.model() == Some(user.type_name().as_str())
    }
}
