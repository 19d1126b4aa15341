//! Database repository for user management operations.
//!
//! Provides CRUD operations for identities. Uniqueness of usernames is
//! enforced by the unique index on `users.username`; callers map the
//! resulting constraint violation to their own conflict error.

use crate::database::models::{CreateUser, Post, User, UserProfile};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new user row.
    ///
    /// A duplicate username surfaces as a database unique-violation error;
    /// there is deliberately no separate existence pre-check.
    pub async fn create_user(&self, user: CreateUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, first_name, last_name, email, role, skill)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.role)
        .bind(&user.skill)
        .fetch_one(self.pool)
        .await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool)
            .await
    }

    /// Lists all users as public profiles, each with its own posts attached.
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, sqlx::Error> {
        let profiles = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, first_name, last_name, username, email, role, skill, last_visited
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        attach_posts(self.pool, profiles).await
    }

    /// Writes back every mutable column of an existing user row.
    pub async fn update_user(&self, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET first_name = ?, last_name = ?, email = ?, role = ?, skill = ?,
                is_active = ?, password_hash = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.role)
        .bind(&user.skill)
        .bind(user.is_active)
        .bind(&user.password_hash)
        .bind(user.id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a user; owned posts and edges go with it via FK cascades.
    pub async fn delete_user(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Stamps the user's last visit, called on successful login.
    pub async fn touch_last_visited(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_visited = CURRENT_TIMESTAMP WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

/// Fills the `posts` field of each profile with the user's own posts.
///
/// One query for the whole batch, grouped in memory, so enumerations stay at
/// two round trips regardless of how many profiles are returned.
pub(crate) async fn attach_posts(
    pool: &SqlitePool,
    mut profiles: Vec<UserProfile>,
) -> Result<Vec<UserProfile>, sqlx::Error> {
    if profiles.is_empty() {
        return Ok(profiles);
    }

    let ids: Vec<String> = profiles.iter().map(|p| p.id.to_string()).collect();
    let query = format!(
        "SELECT * FROM posts WHERE user_id IN ({}) ORDER BY id",
        ids.join(",")
    );

    let posts = sqlx::query_as::<_, Post>(&query).fetch_all(pool).await?;

    let mut by_user: HashMap<i64, Vec<Post>> = HashMap::new();
    for post in posts {
        by_user.entry(post.user_id).or_default().push(post);
    }

    for profile in &mut profiles {
        if let Some(posts) = by_user.remove(&profile.id) {
            profile.posts = posts;
        }
    }

    Ok(profiles)
}
