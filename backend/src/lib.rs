//! Blog backend: user accounts, posts, follow and like relations, served
//! over HTTP with JSON payloads and JWT bearer authentication.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::api::common::ApiResponse;
use crate::utils::jwt::JwtKeys;
use axum::{Extension, Router, response::Json, routing::get};
use sqlx::SqlitePool;

/// Builds the full application router.
///
/// The pool and the signing keys are the only shared state; both are
/// injected as extensions so the integration tests can drive the router
/// in-process with an in-memory database.
pub fn app(pool: SqlitePool, jwt: JwtKeys) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api/v1/auth", auth::routes::auth_router())
        .nest("/api/v1/users", api::user::routes::user_router())
        .nest("/api/v1/posts", api::post::routes::post_router())
        .layer(Extension(pool))
        .layer(Extension(jwt))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Blog Backend",
            "version": "0.1.0"
        }),
        "Welcome to the blog API",
    ))
}
