//! End-to-end tests of the token engine over the in-process cache
//! and the static user provider.

use std::collections::HashMap;

use tg_core::domain::ClaimSet;
use tg_core::repositories::UserProvider;
use tg_core::services::JwtAuth;
use tg_infra::{build_cache, StaticUser, StaticUserProvider};
use tg_shared::config::{CacheConfig, JwtConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn engine(config: &JwtConfig) -> JwtAuth<StaticUser> {
    let cache = build_cache(&CacheConfig::default()).await.unwrap();
    JwtAuth::new(config, cache).unwrap()
}

fn users() -> StaticUserProvider {
    StaticUserProvider::new().with_user(
        StaticUser::new("42", "ada@example.com", "Ada")
            .with_password("secret", 4)
            .unwrap(),
    )
}

#[tokio::test]
async fn test_login_resolve_logout_cycle() {
    init_tracing();
    let auth = engine(&JwtConfig::new("integration-secret").with_issuer("Acme", "Api")).await;
    let users = users();

    let credentials: HashMap<String, String> = [
        ("email".to_string(), "ada@example.com".to_string()),
        ("password".to_string(), "secret".to_string()),
    ]
    .into_iter()
    .collect();
    let user = users.retrieve_by_credentials(&credentials).await.unwrap().unwrap();
    assert!(users.validate_credentials(&user, &credentials).await.unwrap());

    let token = auth.generate_token(&user, ClaimSet::new()).unwrap();
    let resolved = auth.retrieve_user(&token, &users).await.unwrap().unwrap();
    assert_eq!(resolved.email, "ada@example.com");
    assert!(resolved.password_hash.is_empty());

    auth.logout(&user.id).await.unwrap();

    assert!(!auth.is_token_valid(&token).await);
    assert!(auth.retrieve_user(&token, &users).await.unwrap().is_none());
}

#[tokio::test]
async fn test_model_safe_binds_token_to_principal_type() {
    init_tracing();
    let auth = engine(&JwtConfig::new("integration-secret").with_model_safe(true)).await;
    let users = users();
    let user = users.retrieve_by_id("42").await.unwrap().unwrap();

    let token = auth.generate_token(&user, ClaimSet::new()).unwrap();
    let claims = auth.retrieve_claims(&token).await;

    assert_eq!(claims.model(), Some(std::any::type_name::<StaticUser>()));
    assert!(auth.retrieve_user(&token, &users).await.unwrap().is_some());
}
