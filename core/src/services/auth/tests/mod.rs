//! Tests for user resolution and the engine facade

mod filter_tests;

use std::sync::Arc;

use tg_shared::config::JwtConfig;

use crate::domain::ManualClock;
use crate::repositories::user::TestUser;
use crate::repositories::MockCacheStore;
use crate::services::auth::JwtAuth;

pub(super) const NOW: i64 = 1_700_000_000;

pub(super) fn config() -> JwtConfig {
    JwtConfig::new("test-signing-secret")
        .with_ttl(3600)
        .with_issuer("Acme", "Api")
}

pub(super) struct Harness {
    pub auth: JwtAuth<TestUser>,
    pub cache: Arc<MockCacheStore>,
    pub clock: Arc<ManualClock>,
}

pub(super) fn harness(config: &JwtConfig) -> Harness {
    let cache = Arc::new(MockCacheStore::new());
    let clock = Arc::new(ManualClock::new(NOW));
    let auth = JwtAuth::with_clock(config, cache.clone(), clock.clone()).unwrap();
    Harness { auth, cache, clock }
}
