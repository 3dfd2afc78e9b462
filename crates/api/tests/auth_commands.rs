//! Sign-in, registration and session-gated commands against a mock backend

use applymate_domain::ApplyMateError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::{context_for, signed_in_context};

#[tokio::test]
async fn login_stores_returned_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/"))
        .and(body_json(json!({ "username": "ada", "password": "hunter2" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "A1", "refresh": "R1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context_for(&server);
    applymate_lib::login(&ctx, "ada", "hunter2").await.expect("login");

    assert!(ctx.is_authenticated());
    assert_eq!(ctx.tokens.access(), "A1");
    assert_eq!(ctx.tokens.refresh(), "R1");
}

#[tokio::test]
async fn rejected_credentials_surface_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context_for(&server);
    let err = applymate_lib::login(&ctx, "ada", "wrong").await.unwrap_err();

    assert_eq!(
        err,
        ApplyMateError::Http {
            status: 401,
            detail: "No active account found with the given credentials".into()
        }
    );
    assert!(!ctx.is_authenticated());
}

#[tokio::test]
async fn login_without_access_token_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "refresh": "R1" })))
        .mount(&server)
        .await;

    let ctx = context_for(&server);
    let err = applymate_lib::login(&ctx, "ada", "hunter2").await.unwrap_err();

    assert!(matches!(err, ApplyMateError::Auth(_)));
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.tokens.refresh(), "");
}

#[tokio::test]
async fn register_does_not_sign_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .and(body_json(json!({ "username": "ada", "email": "ada@example.com", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": 9, "username": "ada", "email": "ada@example.com" })),
        )
        .mount(&server)
        .await;

    let ctx = context_for(&server);
    let user = applymate_lib::register(&ctx, "ada", "ada@example.com", "pw").await.unwrap();

    assert_eq!(user.id, 9);
    assert!(!ctx.is_authenticated());
}

#[tokio::test]
async fn gated_commands_fail_fast_when_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let ctx = context_for(&server);

    assert!(matches!(applymate_lib::current_user(&ctx).await, Err(ApplyMateError::Auth(_))));
    assert!(matches!(applymate_lib::list_jobs(&ctx, None).await, Err(ApplyMateError::Auth(_))));
    assert!(matches!(applymate_lib::load_board(&ctx).await, Err(ApplyMateError::Auth(_))));
}

#[tokio::test]
async fn current_user_uses_session_and_logout_ends_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 1, "username": "ada", "email": "ada@example.com" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server);
    let user = applymate_lib::current_user(&ctx).await.unwrap();
    assert_eq!(user.username, "ada");

    applymate_lib::logout(&ctx).await.unwrap();
    assert!(!ctx.is_authenticated());
    assert!(matches!(applymate_lib::current_user(&ctx).await, Err(ApplyMateError::Auth(_))));
}

#[tokio::test]
async fn expired_session_is_reported_and_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"detail":"Given token not valid for any token type","code":"token_not_valid"}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"detail":"Token is invalid or expired","code":"token_not_valid"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server);
    let err = applymate_lib::current_user(&ctx).await.unwrap_err();

    assert_eq!(err, ApplyMateError::SessionExpired);
    assert!(err.requires_login());
    assert!(!ctx.is_authenticated());
}
