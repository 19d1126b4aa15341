//! Database repository for posts and the like relation.
//!
//! Viewer-facing reads come back as `PostView` rows whose `liked` and
//! `liked_count` columns are computed inside the query (correlated EXISTS
//! and COUNT over the `likes` table) rather than by loading a liker list
//! into the application.

use crate::database::models::{CreatePostRequest, Post, PostView};
use sqlx::SqlitePool;

pub struct PostRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_post(&self, post: &CreatePostRequest) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.user_id)
        .fetch_one(self.pool)
        .await
    }

    pub async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
    }

    /// A single post annotated for `viewer_id`.
    pub async fn view_post(
        &self,
        id: i64,
        viewer_id: i64,
    ) -> Result<Option<PostView>, sqlx::Error> {
        sqlx::query_as::<_, PostView>(
            r#"
            SELECT p.id, p.title, p.content, p.user_id,
                   EXISTS (SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = ?)
                       AS liked,
                   (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS liked_count
            FROM posts p
            WHERE p.id = ?
            "#,
        )
        .bind(viewer_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
    }

    /// All posts annotated for `viewer_id`, in id order.
    pub async fn view_all_posts(&self, viewer_id: i64) -> Result<Vec<PostView>, sqlx::Error> {
        sqlx::query_as::<_, PostView>(
            r#"
            SELECT p.id, p.title, p.content, p.user_id,
                   EXISTS (SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = ?)
                       AS liked,
                   (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS liked_count
            FROM posts p
            ORDER BY p.id
            "#,
        )
        .bind(viewer_id)
        .fetch_all(self.pool)
        .await
    }

    pub async fn update_post(&self, post: &Post) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE posts
            SET title = ?, content = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_post(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Records a like edge. Idempotent over the (user, post) pair.
    pub async fn like(&self, user_id: i64, post_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO likes (user_id, post_id)
            VALUES (?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Removes a like edge. Unliking a never-liked post is a no-op.
    pub async fn unlike(&self, user_id: i64, post_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM likes WHERE user_id = ? AND post_id = ?")
            .bind(user_id)
            .bind(post_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
