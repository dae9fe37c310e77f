//! Tests for the token services


use std::sync::Arc;

use tg_shared::config::JwtConfig;

use crate::domain::ManualClock;
use crate::repositories::MockCacheStore;
use crate::services::revocation::RevocationLedger;
use crate::services::token::{ClaimsCodec, JwtSettings, TokenIssuer, TokenValidator};

pub(super) const SECRET: &str = "test-signing-secret";
pub(super) const NOW: i64 = 1_700_000_000;

/// Issuer, validator and the collaborators behind them, sharing one clock and cache
pub(super) struct Fixture {
    pub issuer: TokenIssuer,
    pub validator: TokenValidator,
    pub ledger: Arc<RevocationLedger>,
    pub clock: Arc<ManualClock>,
    pub cache: Arc<MockCacheStore>,
    pub codec: Arc<ClaimsCodec>,
}

pub(super) fn config() -> JwtConfig {
    JwtConfig::new(SECRET).with_ttl(3600).with_issuer("Acme", "Api")
}

pub(super) fn fixture(config: &JwtConfig) -> Fixture {
    let settings = Arc::new(JwtSettings::from_config(config).unwrap());
    let codec = Arc::new(ClaimsCodec::new(settings.secret()));
    let clock = Arc::new(ManualClock::new(NOW));
    let cache = Arc::new(MockCacheStore::new());
    let ledger = Arc::new(RevocationLedger::new(
        cache.clone(),
        settings.cache_ttl_minutes(),
        clock.clone(),
    ));

    Fixture {
        issuer: TokenIssuer::new(codec.clone(), settings.clone(), clock.clone()),
        validator: TokenValidator::new(codec.clone(), settings, ledger.clone(), clock.clone()),
        ledger,
        clock,
        cache,
        codec,
    }
}
