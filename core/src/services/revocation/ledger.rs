//! Revocation markers
//!
//! Two kinds of marker coexist, both holding the Unix time they were written,
//! in microseconds:
//!
//! * `invalidated:<jti>` revokes one token. Presence alone is enough, since the
//!   marker's TTL never exceeds the lifetime of the token it names.
//! * `logout:<sub>` revokes every token of a subject issued at or before the
//!   marker time, compared through `ClaimSet::issued_at_micros`. Tokens issued
//!   afterwards are unaffected, even within the same second, so the subject
//!   can sign in again right away.
//!
//! Markers are never deleted; they age out through the cache TTL.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::domain::{ClaimSet, Clock};
use crate::errors::DomainResult;
use crate::repositories::CacheStore;

const INVALIDATED_PREFIX: &str = "invalidated:";
const LOGOUT_PREFIX: &str = "logout:";

/// Cache key of a per-token marker
pub fn invalidated_key(jti: &str) -> String {
    format!("{}{}", INVALIDATED_PREFIX, jti)
}

/// Cache key of a subject-wide logout marker
pub fn logout_key(subject: &str) -> String {
    format!("{}{}", LOGOUT_PREFIX, subject)
}

/// Records and checks revocation markers
pub struct RevocationLedger {
    cache: Arc<dyn CacheStore>,
    ttl_minutes: u64,
    clock: Arc<dyn Clock>,
}

impl RevocationLedger {
    /// `ttl_minutes` should be the token lifetime rounded up to whole minutes
    pub fn new(cache: Arc<dyn CacheStore>, ttl_minutes: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache,
            ttl_minutes,
            clock,
        }
    }

    /// Revokes the single token whose `jti` claim is `jti`
    pub async fn invalidate_token(&self, jti: &str) -> DomainResult<()> {
        let now = self.clock.now_micros();
        self.cache
            .put(&invalidated_key(jti), Value::from(now), self.ttl_minutes)
            .await?;
        info!(jti, at = now, "Token invalidated");
        Ok(())
    }

    /// Revokes every token issued to `subject` up to now
    pub async fn logout_subject(&self, subject: &str) -> DomainResult<()> {
        let now = self.clock.now_micros();
        self.cache
            .put(&logout_key(subject), Value::from(now), self.ttl_minutes)
            .await?;
        info!(sub = subject, at = now, "Subject logged out");
        Ok(())
    }

    /// Time the token was invalidated (microseconds), if it was
    pub async fn invalidated_at(&self, jti: &str) -> DomainResult<Option<i64>> {
        self.marker(&invalidated_key(jti)).await
    }

    /// Time of the subject's latest logout (microseconds), if any is still live
    pub async fn logged_out_at(&self, subject: &str) -> DomainResult<Option<i64>> {
        self.marker(&logout_key(subject)).await
    }

    /// Whether a token with these claims has been revoked by either mechanism
    pub async fn is_revoked(&self, claims: &ClaimSet) -> DomainResult<bool> {
        if let Some(jti) = claims.jti() {
            if self.invalidated_at(jti).await?.is_some() {
                return Ok(true);
            }
        }

        if let Some(subject) = claims.subject() {
            if let Some(logout_at) = self.logged_out_at(&subject).await? {
                // Without an issue time the token cannot prove it postdates the logout
                return Ok(claims
                    .issued_at_micros()
                    .map_or(true, |issued| issued <= logout_at));
            }
        }

        Ok(false)
    }

    // An unreadable marker value counts as "as late as possible"
    async fn marker(&self, key: &str) -> DomainResult<Option<i64>> {
        Ok(self.cache.get(key).await?.map(|v| v.as_i64().unwrap_or(i64::MAX)))
    }
}
