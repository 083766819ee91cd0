//! End-to-end tests for the auth endpoints over in-memory repositories

use std::sync::Arc;

use actix_web::{http::header, http::StatusCode, test, web, App};
use mc_api::app::configure_app;
use mc_api::dto::AuthTokensResponse;
use mc_api::middleware::TokenVerifier;
use mc_api::routes::auth::AppState;
use mc_core::repositories::{MockTokenRepository, MockUserRepository};
use mc_core::services::{AuthService, TokenService, TokenServiceConfig};
use mc_infra::BcryptPasswordHasher;
use mc_shared::Environment;
use serde_json::{json, Value};

type TestState = AppState<MockUserRepository, MockTokenRepository, BcryptPasswordHasher>;

fn app_data() -> (web::Data<TestState>, web::Data<Arc<dyn TokenVerifier>>) {
    let token_service = Arc::new(
        TokenService::new(MockTokenRepository::new(), TokenServiceConfig::default()).unwrap(),
    );
    let auth_service = Arc::new(AuthService::new(
        Arc::new(MockUserRepository::new()),
        Arc::clone(&token_service),
        Arc::new(BcryptPasswordHasher::new(4)),
    ));

    let verifier: Arc<dyn TokenVerifier> = token_service;
    (
        web::Data::new(AppState::new(auth_service, Environment::Development)),
        web::Data::new(verifier),
    )
}

macro_rules! test_app {
    () => {{
        let (state, verifier) = app_data();
        test::init_service(
            App::new()
                .app_data(state)
                .app_data(verifier)
                .configure(configure_app::<MockUserRepository, MockTokenRepository, BcryptPasswordHasher>),
        )
        .await
    }};
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! register {
    ($app:expr, $email:expr) => {{
        let resp = post_json!(
            $app,
            "/api/auth/register",
            json!({
                "email": $email,
                "password": "correct-horse",
                "first_name": "Ada",
                "last_name": "Lovelace"
            })
        );
        assert_eq!(resp.status(), StatusCode::OK);
        let tokens: AuthTokensResponse = test::read_body_json(resp).await;
        tokens
    }};
}

#[actix_web::test]
async fn test_health_check() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_register_returns_token_pair() {
    let app = test_app!();

    let tokens = register!(app, "ada@example.com");

    assert_eq!(tokens.access_token.split('.').count(), 3);
    assert_eq!(tokens.refresh_token.len(), 44);
}

#[actix_web::test]
async fn test_register_duplicate_email_rejected() {
    let app = test_app!();
    register!(app, "ada@example.com");

    let resp = post_json!(
        app,
        "/api/auth/register",
        json!({
            "email": "ada@example.com",
            "password": "another-password",
            "first_name": "Ada",
            "last_name": "Byron"
        })
    );

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
    assert_eq!(body["message"], "Email already registered");
}

#[actix_web::test]
async fn test_register_invalid_fields_reported() {
    let app = test_app!();

    let resp = post_json!(
        app,
        "/api/auth/register",
        json!({
            "email": "not-an-email",
            "password": "short",
            "first_name": "Ada",
            "last_name": "Lovelace"
        })
    );

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["email"][0], "Invalid email format");
    assert!(body["details"]["password"].is_array());
}

#[actix_web::test]
async fn test_malformed_json_body() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app!();
    register!(app, "ada@example.com");

    let wrong_password = post_json!(
        app,
        "/api/auth/login",
        json!({ "email": "ada@example.com", "password": "wrong-password" })
    );
    let unknown_email = post_json!(
        app,
        "/api/auth/login",
        json!({ "email": "nobody@example.com", "password": "correct-horse" })
    );

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let first: Value = test::read_body_json(wrong_password).await;
    let second: Value = test::read_body_json(unknown_email).await;
    assert_eq!(first["message"], "Invalid email or password");
    assert_eq!(first["message"], second["message"]);
    assert_eq!(first["error"], second["error"]);
}

#[actix_web::test]
async fn test_login_revokes_previous_refresh_token() {
    let app = test_app!();
    let registered = register!(app, "ada@example.com");

    let resp = post_json!(
        app,
        "/api/auth/login",
        json!({ "email": "ada@example.com", "password": "correct-horse" })
    );
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = post_json!(
        app,
        "/api/auth/refresh-token",
        json!({ "refresh_token": registered.refresh_token })
    );
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_rotates_and_rejects_reuse() {
    let app = test_app!();
    let registered = register!(app, "ada@example.com");

    let resp = post_json!(
        app,
        "/api/auth/refresh-token",
        json!({
            "access_token": registered.access_token,
            "refresh_token": registered.refresh_token
        })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated: AuthTokensResponse = test::read_body_json(resp).await;
    assert_ne!(rotated.refresh_token, registered.refresh_token);

    let reuse = post_json!(
        app,
        "/api/auth/refresh-token",
        json!({ "refresh_token": registered.refresh_token })
    );
    assert_eq!(reuse.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(reuse).await;
    assert_eq!(body["message"], "Token is expired or revoked");

    let resp = post_json!(
        app,
        "/api/auth/refresh-token",
        json!({ "refresh_token": rotated.refresh_token })
    );
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_unknown_token() {
    let app = test_app!();

    let resp = post_json!(
        app,
        "/api/auth/refresh-token",
        json!({ "refresh_token": "bm90LWEtcmVhbC10b2tlbg==" })
    );

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid refresh token");
}

#[actix_web::test]
async fn test_me_requires_bearer_token() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, "Basic YWRhOnB3"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_returns_profile() {
    let app = test_app!();
    let tokens = register!(app, "ada@example.com");

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", tokens.access_token),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["full_name"], "Ada Lovelace");
    assert_eq!(body["role"], "User");
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_me_rejects_tampered_token() {
    let app = test_app!();
    let tokens = register!(app, "ada@example.com");

    let (unsigned, signature) = tokens.access_token.rsplit_once('.').unwrap();
    let first = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", unsigned, first, &signature[1..]);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tampered)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}
