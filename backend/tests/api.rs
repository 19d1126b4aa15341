//! End-to-end tests driving the full router in-process against an
//! in-memory database.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use backend::app;
use backend::utils::jwt::JwtKeys;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn test_app() -> Router {
    // One connection only: every in-memory SQLite connection is a separate
    // database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations failed");

    app(pool, JwtKeys::new("test-secret", 200))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

async fn register(app: &Router, username: &str, password: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": username,
            "password": password,
            "email": format!("{username}@example.com"),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["data"]["id"].as_i64().unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_like_flow() {
    let app = test_app().await;

    let alice_id = register(&app, "alice", "pw1").await;
    let token = login(&app, "alice", "pw1").await;

    // Wrong password is a generic 401.
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["error_type"], "unauthorized");

    // A fresh post starts unliked.
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/posts/create",
        Some(&token),
        Some(json!({ "title": "hello", "content": "world", "user_id": alice_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/v1/posts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["liked"], false);
    assert_eq!(posts[0]["liked_count"], 0);
    let post_id = posts[0]["id"].as_i64().unwrap();

    // Like it as alice.
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/posts/like",
        Some(&token),
        Some(json!({ "user_id": alice_id, "post_id": post_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/v1/posts/get/{post_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["liked"], true);
    assert_eq!(body["data"]["liked_count"], 1);

    // Bob sees the count but not alice's like flag.
    register(&app, "bob", "pw2").await;
    let bob_token = login(&app, "bob", "pw2").await;

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/v1/posts/get/{post_id}"),
        Some(&bob_token),
        None,
    )
    .await;
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["liked_count"], 1);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app().await;

    register(&app, "alice", "pw1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "alice",
            "password": "other",
            "email": "alice2@example.com",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["error_type"], "already_exists");
}

#[tokio::test]
async fn protected_routes_reject_bad_tokens() {
    let app = test_app().await;

    // No header at all.
    let (status, _) = send(&app, "GET", "/api/v1/posts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token.
    let (status, _) = send(&app, "GET", "/api/v1/posts", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Wrong header shape (no Bearer scheme).
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/users")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Token signed with a different secret.
    let forged = JwtKeys::new("other-secret", 200).issue("alice").unwrap();
    let (status, _) = send(&app, "GET", "/api/v1/posts", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn follow_graph_over_http() {
    let app = test_app().await;

    let alice_id = register(&app, "alice", "pw1").await;
    let bob_id = register(&app, "bob", "pw2").await;
    let token = login(&app, "alice", "pw1").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/users/follow",
        Some(&token),
        Some(json!({ "follower_id": alice_id, "followed_id": bob_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/followers/{bob_id}"),
        Some(&token),
        None,
    )
    .await;
    let followers = body["data"].as_array().unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0]["username"], "alice");
    // The password hash never leaves the server.
    assert!(followers[0].get("password_hash").is_none());

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/users/unfollow",
        Some(&token),
        Some(json!({ "follower_id": alice_id, "followed_id": bob_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/v1/users/followers/{bob_id}"),
        Some(&token),
        None,
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
