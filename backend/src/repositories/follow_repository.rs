//! Database repository for the follow relation.
//!
//! Follow edges are directed (follower -> followed) rows in `user_follows`
//! with a composite primary key, so inserting the same edge twice is a
//! harmless no-op and deleting a missing edge affects zero rows.

use crate::database::models::UserProfile;
use crate::repositories::user_repository::attach_posts;
use sqlx::SqlitePool;

pub struct FollowRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> FollowRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Records a follow edge. Idempotent over the (follower, followed) pair.
    pub async fn follow(&self, follower_id: i64, followed_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO user_follows (follower_id, followed_id)
            VALUES (?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Removes a follow edge. A never-followed pair is a no-op, not an error.
    pub async fn unfollow(&self, follower_id: i64, followed_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM user_follows WHERE follower_id = ? AND followed_id = ?")
            .bind(follower_id)
            .bind(followed_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Profiles of everyone following `user_id`, with their posts attached.
    pub async fn followers(&self, user_id: i64) -> Result<Vec<UserProfile>, sqlx::Error> {
        let profiles = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.username, u.email, u.role,
                   u.skill, u.last_visited
            FROM users u
            JOIN user_follows f ON u.id = f.follower_id
            WHERE f.followed_id = ?
            ORDER BY u.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        attach_posts(self.pool, profiles).await
    }

    /// Profiles of everyone `user_id` follows, with their posts attached.
    pub async fn following(&self, user_id: i64) -> Result<Vec<UserProfile>, sqlx::Error> {
        let profiles = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.username, u.email, u.role,
                   u.skill, u.last_visited
            FROM users u
            JOIN user_follows f ON u.id = f.followed_id
            WHERE f.follower_id = ?
            ORDER BY u.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        attach_posts(self.pool, profiles).await
    }
}
