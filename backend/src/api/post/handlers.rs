//! Handler functions for post and like API endpoints.
//!
//! Reads are annotated for the requesting viewer: the verified claims are
//! pulled from the request extensions (set by the JWT middleware) and
//! resolved to an identity before any post comes back.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::database::models::{CreatePostRequest, LikeRequest, Post, PostView, UpdatePostRequest};
use crate::services::post_service::PostService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// Retrieves all posts annotated for the requesting viewer.
#[axum::debug_handler]
pub async fn get_all_posts(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<PostView>>>, (StatusCode, String)> {
    let post_service = PostService::new(&pool);

    match post_service.list_posts(&claims).await {
        Ok(posts) => Ok(Json(ApiResponse::success(posts, "Get posts successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Creates a new post.
#[axum::debug_handler]
pub async fn create_post(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, (StatusCode, String)> {
    let post_service = PostService::new(&pool);

    match post_service.create_post(payload).await {
        Ok(post) => Ok(Json(ApiResponse::success(
            post,
            "Create new post successful",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Retrieves one post annotated for the requesting viewer.
#[axum::debug_handler]
pub async fn get_post_by_id(
    Extension(pool): Extension<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PostView>>, (StatusCode, String)> {
    let post_service = PostService::new(&pool);

    match post_service.get_post(&claims, id).await {
        Ok(post) => Ok(Json(ApiResponse::success(
            post,
            "Get post by id successful",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Applies a partial update to a post.
#[axum::debug_handler]
pub async fn update_post_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, (StatusCode, String)> {
    let post_service = PostService::new(&pool);

    match post_service.update_post(id, payload).await {
        Ok(post) => Ok(Json(ApiResponse::success(post, "Update post successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Deletes a post.
#[axum::debug_handler]
pub async fn delete_post_by_id(
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    let post_service = PostService::new(&pool);

    match post_service.delete_post(id).await {
        Ok(()) => Ok(Json(ApiResponse::success((), "Delete post successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Records a like edge between a user and a post.
#[axum::debug_handler]
pub async fn like_post(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<LikeRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    let post_service = PostService::new(&pool);

    match post_service.like_post(payload.user_id, payload.post_id).await {
        Ok(()) => Ok(Json(ApiResponse::success((), "Like post successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Removes a like edge; a never-liked pair succeeds quietly.
#[axum::debug_handler]
pub async fn unlike_post(
    Extension(pool): Extension<SqlitePool>,
    Json(payload): Json<LikeRequest>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    let post_service = PostService::new(&pool);

    match post_service
        .unlike_post(payload.user_id, payload.post_id)
        .await
    {
        Ok(()) => Ok(Json(ApiResponse::success((), "Unlike post successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
