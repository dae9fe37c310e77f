//! Shared setup for the HTTP integration tests

#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use actix_web::http::header::{HeaderName, AUTHORIZATION};
use actix_web::web;
use tg_api::AppState;
use tg_core::errors::{DomainError, DomainResult};
use tg_core::services::JwtAuth;
use tg_infra::{MemoryCache, StaticUser, StaticUserProvider};
use tg_shared::config::JwtConfig;

pub const SECRET: &str = "integration-test-secret";
pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

pub type TestState = AppState<StaticUser, StaticUserProvider>;

pub fn ada() -> StaticUser {
    StaticUser::new("42", EMAIL, "Ada Lovelace")
        .with_password(PASSWORD, 4)
        .expect("hash password")
}

pub fn provider() -> StaticUserProvider {
    StaticUserProvider::new().with_user(ada())
}

pub fn engine() -> JwtAuth<StaticUser> {
    JwtAuth::new(&JwtConfig::new(SECRET), Arc::new(MemoryCache::new())).expect("engine")
}

pub fn state() -> web::Data<TestState> {
    web::Data::new(AppState::new(engine(), provider()))
}

fn suspend(_: StaticUser) -> DomainResult<Option<StaticUser>> {
    Err(DomainError::filter_rejected("account suspended"))
}

/// State whose engine refuses every resolved user
pub fn suspended_state() -> web::Data<TestState> {
    web::Data::new(AppState::new(engine().with_filter(suspend), provider()))
}

pub fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", token))
}

/// Logs in through the HTTP endpoint and evaluates to the issued token
macro_rules! login_token {
    ($app:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({
                "email": common::EMAIL,
                "password": common::PASSWORD,
            }))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(&$app, req).await;
        body["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }};
}
