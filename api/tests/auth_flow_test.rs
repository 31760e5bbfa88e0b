//! Integration tests for the authentication endpoints

mod common;

use actix_web::{http::header, test};
use cf_api::app::create_app;
use serde_json::{json, Value};

use common::{bearer, test_context};

#[actix_web::test]
async fn test_register_returns_created_with_token() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "ana@cashflow.io", "password": "secret123", "name": "Ana" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["user"]["email"], "ana@cashflow.io");
    assert_eq!(body["data"]["user"]["name"], "Ana");
    assert!(body["data"]["access_token"].as_str().is_some());
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_register_duplicate_email_conflict() {
    let ctx = test_context();
    ctx.register("ana@cashflow.io", "secret123", "Ana").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "ana@cashflow.io", "password": "other-pass", "name": "Ana 2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email already exists");
    assert_eq!(ctx.users.len().await, 1);
}

#[actix_web::test]
async fn test_register_validation_errors() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let invalid_bodies = [
        json!({ "email": "not-an-email", "password": "secret123", "name": "Ana" }),
        json!({ "email": "ana@cashflow.io", "password": "12345", "name": "Ana" }),
        json!({ "email": "ana@cashflow.io", "password": "secret123", "name": "" }),
        json!({ "email": "ana@cashflow.io", "password": "p".repeat(73), "name": "Ana" }),
    ];

    for body in invalid_bodies {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "body {}", body);
    }
    assert!(ctx.users.is_empty().await);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid request body");
}

#[actix_web::test]
async fn test_login_success_and_failures() {
    let ctx = test_context();
    ctx.register("ana@cashflow.io", "secret123", "Ana").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ana@cashflow.io", "password": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    assert!(body["data"]["access_token"].as_str().is_some());

    let mut messages = Vec::new();
    for (email, password) in [("ana@cashflow.io", "wrong-pass"), ("nobody@cashflow.io", "secret123")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        messages.push(body["message"].clone());
    }
    assert_eq!(messages[0], "Invalid credentials");
    assert_eq!(messages[0], messages[1]);
}

#[actix_web::test]
async fn test_me_returns_profile() {
    let ctx = test_context();
    let token = ctx.register("ana@cashflow.io", "secret123", "Ana").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "ana@cashflow.io");
    assert_eq!(body["data"]["name"], "Ana");
}

#[actix_web::test]
async fn test_logout_revokes_only_presented_token() {
    let ctx = test_context();
    let first = ctx.register("ana@cashflow.io", "secret123", "Ana").await;
    let second = ctx
        .state
        .auth_service
        .login("ana@cashflow.io", "secret123")
        .await
        .unwrap()
        .access_token;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&first))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logout successful");

    // The revoked token no longer passes the gate, not even for logout
    for uri in ["/api/v1/auth/me", "/api/v1/auth/logout"] {
        let req = if uri.ends_with("me") {
            test::TestRequest::get()
        } else {
            test::TestRequest::post()
        }
        .uri(uri)
        .insert_header(bearer(&first))
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "{}", uri);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&second))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_update_profile() {
    let ctx = test_context();
    let token = ctx.register("ana@cashflow.io", "secret123", "Ana").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Ana Maria" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Ana Maria");

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/profile")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "   " }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::put()
        .uri("/api/v1/auth/profile")
        .set_json(json!({ "name": "No Token" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_store_outage_is_internal_error() {
    let ctx = test_context();
    let token = ctx.register("ana@cashflow.io", "secret123", "Ana").await;
    ctx.sessions.set_unavailable(true);
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Internal server error");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "bo@cashflow.io", "password": "secret123", "name": "Bo" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 500);
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
