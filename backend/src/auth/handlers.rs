//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration and login,
//! parse request data, and interact with the `auth::service` for core
//! business logic.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::auth::service::AuthService;
use crate::database::models::UserProfile;
use crate::utils::jwt::JwtKeys;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt): Extension<JwtKeys>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &jwt);

    match auth_service.register(payload).await {
        Ok(user) => Ok(Json(ApiResponse::success(user, "Register successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt): Extension<JwtKeys>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, String)> {
    let auth_service = AuthService::new(&pool, &jwt);

    match auth_service.login(payload).await {
        Ok(response) => Ok(Json(ApiResponse::success(response, "Login successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
