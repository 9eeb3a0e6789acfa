//! API integration tests
//!
//! Tests marked with #[ignore] require a PostgreSQL database with the
//! schema bootstrapped (`db::create_tables`). To run them, point
//! DATABASE_URL at a test database and run: cargo test -- --ignored

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tasklist_api::create_router_for_testing;
use tower::ServiceExt;

/// Helper to create a JSON request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Helper to create a form-encoded login request
fn create_login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/token")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={username}&password={password}"
        )))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Welcome & Health Tests
// =============================================================================

#[tokio::test]
async fn test_root_welcome() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_user_root_welcome() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/user/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_check() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/todos/"].is_object());
}

// =============================================================================
// Authentication Rejection Tests (no database needed)
// =============================================================================

#[tokio::test]
async fn test_todos_require_auth() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/todos/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_auth() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/user/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_auth_header_rejected() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/todos/")
                .header("Authorization", "Basic alice:pw")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_bearer_token_rejected() {
    let app = create_router_for_testing();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/todos/")
                .header("Authorization", "Bearer not.a.jwt")
                .header("Content-Type", "application/json")
                .body(Body::from(json!({"content": "Buy milk"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_garbage_token_rejected() {
    // Refresh-token decoding fails before any user lookup
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/token/refresh",
        Some(json!({"refresh_token": "not.a.jwt"})),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    // Payload validation runs before the duplicate check
    let app = create_router_for_testing();

    let request = create_json_request(
        "POST",
        "/user/register",
        Some(json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "pw"
        })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Database-backed flows
// =============================================================================

/// Register a fresh user and return (username, email, password).
async fn register_user(app: &axum::Router) -> (String, String, String) {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let username = format!("user_{}", &suffix[..12]);
    let email = format!("{username}@example.com");
    let password = "pw".to_string();

    let request = create_json_request(
        "POST",
        "/user/register",
        Some(json!({
            "username": username,
            "email": email,
            "password": password
        })),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    (username, email, password)
}

/// Login and return the access token.
async fn login(app: &axum::Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(create_login_request(username, password))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["token_type"], "bearer");
    json["access_token"].as_str().unwrap().to_string()
}

fn authed_json_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_register_login_create_list_flow() {
    let app = create_router_for_testing();

    let (username, _email, password) = register_user(&app).await;
    let token = login(&app, &username, &password).await;

    // Empty list reports 404
    let response = app
        .clone()
        .oneshot(authed_json_request("GET", "/todos/", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Create a task
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/todos/",
            &token,
            Some(json!({"content": "Buy milk"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["content"], "Buy milk");
    assert_eq!(created["is_completed"], false);

    // The list now holds exactly that task
    let response = app
        .clone()
        .oneshot(authed_json_request("GET", "/todos/", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["content"], "Buy milk");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_wrong_password_matches_unknown_user_shape() {
    let app = create_router_for_testing();

    let (username, _email, _password) = register_user(&app).await;

    let wrong_pw = app
        .clone()
        .oneshot(create_login_request(&username, "wrong"))
        .await
        .unwrap();
    let no_user = app
        .clone()
        .oneshot(create_login_request("no_such_user_anywhere", "wrong"))
        .await
        .unwrap();

    // Identical status and body shape - no account enumeration
    assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(no_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_pw).await, body_json(no_user).await);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_duplicate_registration_conflicts() {
    let app = create_router_for_testing();

    let (username, email, password) = register_user(&app).await;

    let request = create_json_request(
        "POST",
        "/user/register",
        Some(json!({
            "username": username,
            "email": email,
            "password": password
        })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_tenant_isolation() {
    let app = create_router_for_testing();

    let (alice, _, alice_pw) = register_user(&app).await;
    let (bob, _, bob_pw) = register_user(&app).await;
    let alice_token = login(&app, &alice, &alice_pw).await;
    let bob_token = login(&app, &bob, &bob_pw).await;

    // Alice creates a task
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/todos/",
            &alice_token,
            Some(json!({"content": "Alice's secret"})),
        ))
        .await
        .unwrap();
    let todo = body_json(response).await;
    let id = todo["id"].as_i64().unwrap();

    // Bob cannot see, edit, or delete it - all indistinguishable from absent
    for request in [
        authed_json_request("GET", &format!("/todos/{id}"), &bob_token, None),
        authed_json_request(
            "PUT",
            &format!("/todos/{id}"),
            &bob_token,
            Some(json!({"content": "hijacked", "is_completed": true})),
        ),
        authed_json_request("DELETE", &format!("/todos/{id}"), &bob_token, None),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // Alice still sees it untouched
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "GET",
            &format!("/todos/{id}"),
            &alice_token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["content"], "Alice's secret");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_update_validates_content_length() {
    let app = create_router_for_testing();

    let (username, _, password) = register_user(&app).await;
    let token = login(&app, &username, &password).await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/todos/",
            &token,
            Some(json!({"content": "Water plants"})),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_i64().unwrap();

    // Two characters is below the minimum of three
    let response = app
        .clone()
        .oneshot(authed_json_request(
            "PUT",
            &format!("/todos/{id}"),
            &token,
            Some(json!({"content": "ab", "is_completed": false})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_delete_twice_fails_second_time() {
    let app = create_router_for_testing();

    let (username, _, password) = register_user(&app).await;
    let token = login(&app, &username, &password).await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/todos/",
            &token,
            Some(json!({"content": "Take out trash"})),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_i64().unwrap();

    let first = app
        .clone()
        .oneshot(authed_json_request(
            "DELETE",
            &format!("/todos/{id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(authed_json_request(
            "DELETE",
            &format!("/todos/{id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_refresh_token_flow() {
    let app = create_router_for_testing();

    let (username, _, password) = register_user(&app).await;

    let response = app
        .clone()
        .oneshot(create_login_request(&username, &password))
        .await
        .unwrap();
    let json = body_json(response).await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    // Exchange the refresh token for a fresh pair
    let response = app
        .clone()
        .oneshot(create_json_request(
            "POST",
            "/token/refresh",
            Some(json!({"refresh_token": refresh_token})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let pair = body_json(response).await;
    let new_access = pair["access_token"].as_str().unwrap();
    assert!(pair["refresh_token"].is_string());

    // The new access token works on protected routes
    let response = app
        .clone()
        .oneshot(authed_json_request("GET", "/user/me", new_access, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["username"], username);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn test_access_token_rejected_as_refresh_token() {
    let app = create_router_for_testing();

    let (username, _, password) = register_user(&app).await;
    let access_token = login(&app, &username, &password).await;

    let response = app
        .oneshot(create_json_request(
            "POST",
            "/token/refresh",
            Some(json!({"refresh_token": access_token})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
