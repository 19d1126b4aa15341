//! Defines the HTTP routes for user profiles and the follow graph.
//!
//! Every route here sits behind the JWT middleware; only registration and
//! login live outside it.

use super::handlers::{
    create_user, delete_user_by_id, follow_user, get_all_users, get_followers_by_id,
    get_following_by_id, get_user_by_id, unfollow_user, update_user_by_id,
};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/", get(get_all_users))
        .route("/create", post(create_user))
        .route("/get/{id}", get(get_user_by_id))
        .route("/update/{id}", patch(update_user_by_id))
        .route("/delete/{id}", delete(delete_user_by_id))
        .route("/follow", post(follow_user))
        .route("/unfollow", post(unfollow_user))
        .route("/followers/{id}", get(get_followers_by_id))
        .route("/following/{id}", get(get_following_by_id))
        .layer(middleware::from_fn(jwt_auth))
}
