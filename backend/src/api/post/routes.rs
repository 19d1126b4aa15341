//! Defines the HTTP routes for posts and likes.

use super::handlers::{
    create_post, delete_post_by_id, get_all_posts, get_post_by_id, like_post, unlike_post,
    update_post_by_id,
};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

pub fn post_router() -> Router {
    Router::new()
        .route("/", get(get_all_posts))
        .route("/create", post(create_post))
        .route("/get/{id}", get(get_post_by_id))
        .route("/update/{id}", patch(update_post_by_id))
        .route("/delete/{id}", delete(delete_post_by_id))
        .route("/like", post(like_post))
        .route("/unlike", post(unlike_post))
        .layer(middleware::from_fn(jwt_auth))
}
