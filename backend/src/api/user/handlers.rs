//! Handler functions for user profile and social-graph API endpoints.
//!
//! These functions process requests for user data and follow-edge
//! mutations, delegating to the user and follow services.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::database::models::{CreateUserRequest, FollowRequest, UpdateUserRequest, UserProfile};
use crate::services::follow_service::FollowService;
use crate::services::user_service::UserService;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// Retrieves all users as public profiles.
#[axum::debug_handler]
pub async fn get_all_users(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);

    match user_service.list_users().await {
        Ok(users) => Ok(Json(ApiResponse::success(users, "Get users successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Creates a user through the management endpoint.
#[axum::debug_handler]
pub async fn create_user(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);

    match user_service.create_user(payload).await {
        Ok(user) => Ok(Json(ApiResponse::success(user, "Create user successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);

    match user_service.get_profile(id).await {
        Ok(user) => Ok(Json(ApiResponse::success(
            user,
            "Get user by id successful",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Applies a partial update to a user.
#[axum::debug_handler]
pub async fn update_user_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);

    match user_service.update_user(id, payload).await {
        Ok(user) => Ok(Json(ApiResponse::success(user, "Update user successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Deletes a user; their posts and edges are removed with them.
#[axum::debug_handler]
pub async fn delete_user_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    let user_service = UserService::new(&pool);

    match user_service.delete_user(id).await {
        Ok(()) => Ok(Json(ApiResponse::success((), "Delete user successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Records a follow edge between two users.
#[axum::debug_handler]
pub async fn follow_user(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<FollowRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    let follow_service = FollowService::new(&pool);

    match follow_service.follow(&payload).await {
        Ok(()) => Ok(Json(ApiResponse::success((), "Follow user successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Removes a follow edge; removing a missing edge succeeds quietly.
#[axum::debug_handler]
pub async fn unfollow_user(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<FollowRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    let follow_service = FollowService::new(&pool);

    match follow_service.unfollow(&payload).await {
        Ok(()) => Ok(Json(ApiResponse::success((), "Unfollow user successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Lists the followers of a user, posts included.
#[axum::debug_handler]
pub async fn get_followers_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, (StatusCode, String)> {
    let follow_service = FollowService::new(&pool);

    match follow_service.followers(id).await {
        Ok(followers) => Ok(Json(ApiResponse::success(
            followers,
            "Get followers by id successful",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Lists the users someone follows, posts included.
#[axum::debug_handler]
pub async fn get_following_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, (StatusCode, String)> {
    let follow_service = FollowService::new(&pool);

    match follow_service.following(id).await {
        Ok(following) => Ok(Json(ApiResponse::success(
            following,
            "Get following by id successful",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
