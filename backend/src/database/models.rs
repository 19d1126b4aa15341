//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models:
//! anything returned to a caller goes through a projection that excludes the
//! password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A registered identity as stored in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub skill: String,
    pub is_active: bool,
    pub last_visited: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a user, safe to serialize in responses.
///
/// `posts` is filled in by the repositories after the row is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub skill: String,
    pub last_visited: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            role: user.role,
            skill: user.skill,
            last_visited: user.last_visited,
            posts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post annotated for a specific viewer.
///
/// `liked` and `liked_count` are computed in SQL from the `likes` relation,
/// so a post never drags a materialized liker list through the application.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub liked: bool,
    pub liked_count: i64,
}

/// Internal DTO handed to the user repository; the password is already hashed
/// by the time this exists.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub skill: String,
}

/// Payload for creating a user through the management endpoint; unlike
/// self-registration the role can be set explicitly.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1-255 characters"
    ))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(email(message = "Must be a valid email"))]
    pub email: String,

    #[serde(default)]
    pub skill: String,

    #[serde(default = "default_role")]
    pub role: String,
}

pub(crate) fn default_role() -> String {
    "user".to_string()
}

/// Partial update payload for a user. Absent fields are left untouched;
/// a present `password` is re-hashed before it reaches storage.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub skill: Option<String>,
    pub active: Option<bool>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Body of a follow/unfollow request, naming both ends of the edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowRequest {
    pub follower_id: i64,
    pub followed_id: i64,
}

/// Body of a like/unlike request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub user_id: i64,
    pub post_id: i64,
}
