//! Integration tests for the authentication routes

#[macro_use]
mod common;

use actix_web::test;
use serde_json::{json, Value};
use tg_api::create_app;
use tg_core::domain::ClaimSet;
use tg_infra::StaticUser;

use common::{bearer, state, suspended_state, EMAIL, PASSWORD};

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(create_app(state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_path_is_not_found() {
    let app = test::init_service(create_app(state())).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_login_success() {
    let state = state();
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ADA@example.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 2_592_000);

    let token = body["access_token"].as_str().unwrap();
    let claims = state.auth.retrieve_claims(token).await;
    assert_eq!(claims.subject().as_deref(), Some("42"));
}

#[actix_web::test]
async fn test_login_wrong_password() {
    let app = test::init_service(create_app(state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": EMAIL, "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CREDENTIALS");
}

#[actix_web::test]
async fn test_login_unknown_user() {
    let app = test::init_service(create_app(state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_login_missing_fields() {
    let app = test::init_service(create_app(state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": " ", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_me_returns_user_and_claims() {
    let app = test::init_service(create_app(state())).await;
    let token = login_token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], "42");
    assert_eq!(body["user"]["email"], EMAIL);
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["claims"]["sub"], "42");
    assert!(body["claims"]["jti"].is_string());
}

#[actix_web::test]
async fn test_me_without_token() {
    let app = test::init_service(create_app(state())).await;

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHENTICATED");
}

#[actix_web::test]
async fn test_me_with_garbage_token() {
    let app = test::init_service(create_app(state())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer("not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHENTICATED");
}

#[actix_web::test]
async fn test_me_with_token_for_unknown_user() {
    let state = state();
    let app = test::init_service(create_app(state.clone())).await;
    let ghost = StaticUser::new("999", "ghost@example.com", "Ghost");
    let token = state.auth.generate_token(&ghost, ClaimSet::new()).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_logout_revokes_token() {
    let app = test::init_service(create_app(state())).await;
    let token = login_token!(app);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logged out successfully");

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_logout_without_token() {
    let app = test::init_service(create_app(state())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_filter_rejection_is_forbidden() {
    let app = test::init_service(create_app(suspended_state())).await;
    let token = login_token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FORBIDDEN");
    assert_eq!(body["message"], "account suspended");
}

#[actix_web::test]
async fn test_login_again_right_after_logout() {
    let app = test::init_service(create_app(state())).await;
    let old = login_token!(app);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&old))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Usually lands in the same second as the logout
    let fresh = login_token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&fresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&old))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}
