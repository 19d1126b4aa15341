//! Post business logic and per-viewer view composition.
//!
//! Reads resolve the requesting identity from the verified claims before
//! touching any post: if the claim's username no longer maps to a stored
//! user, the whole read fails as unauthenticated instead of quietly
//! returning `liked = false` everywhere.

use crate::database::models::{CreatePostRequest, Post, PostView, UpdatePostRequest};
use crate::errors::{AuthError, ServiceError, ServiceResult};
use crate::repositories::post_repository::PostRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::flatten_validation_errors;
use crate::utils::jwt::Claims;
use sqlx::SqlitePool;
use validator::Validate;

pub struct PostService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> PostService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Maps the session claim to a concrete viewer id.
    async fn resolve_viewer(&self, claims: &Claims) -> ServiceResult<i64> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_username(&claims.username)
            .await?
            .ok_or_else(|| {
                AuthError::Unauthenticated(format!(
                    "claim username '{}' has no stored identity",
                    claims.username
                ))
            })?;

        Ok(user.id)
    }

    pub async fn create_post(&self, request: CreatePostRequest) -> ServiceResult<Post> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(
                flatten_validation_errors(validation_errors).join(", "),
            ));
        }

        let repo = PostRepository::new(self.pool);
        Ok(repo.create_post(&request).await?)
    }

    /// One post annotated with the viewer's like state and the like count.
    pub async fn get_post(&self, claims: &Claims, id: i64) -> ServiceResult<PostView> {
        let viewer_id = self.resolve_viewer(claims).await?;

        let repo = PostRepository::new(self.pool);
        repo.view_post(id, viewer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", id))
    }

    /// Every post annotated for the viewer, in id order.
    pub async fn list_posts(&self, claims: &Claims) -> ServiceResult<Vec<PostView>> {
        let viewer_id = self.resolve_viewer(claims).await?;

        let repo = PostRepository::new(self.pool);
        Ok(repo.view_all_posts(viewer_id).await?)
    }

    pub async fn update_post(&self, id: i64, update: UpdatePostRequest) -> ServiceResult<Post> {
        let repo = PostRepository::new(self.pool);
        let mut post = repo
            .get_post_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", id))?;

        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(content) = update.content {
            post.content = content;
        }

        repo.update_post(&post).await?;
        Ok(post)
    }

    pub async fn delete_post(&self, id: i64) -> ServiceResult<()> {
        let repo = PostRepository::new(self.pool);
        if repo.delete_post(id).await? == 0 {
            return Err(ServiceError::not_found("Post", id));
        }
        Ok(())
    }

    /// Records a like edge; repeated likes of the same post are no-ops.
    pub async fn like_post(&self, user_id: i64, post_id: i64) -> ServiceResult<()> {
        let repo = PostRepository::new(self.pool);
        repo.like(user_id, post_id).await?;
        Ok(())
    }

    /// Removes a like edge; unliking a never-liked post is a no-op.
    pub async fn unlike_post(&self, user_id: i64, post_id: i64) -> ServiceResult<()> {
        let repo = PostRepository::new(self.pool);
        repo.unlike(user_id, post_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreateUserRequest;
    use crate::database::test_pool;
    use crate::services::user_service::UserService;
    use sqlx::SqlitePool;

    async fn seed_user(pool: &SqlitePool, username: &str) -> (i64, Claims) {
        let profile = UserService::new(pool)
            .create_user(CreateUserRequest {
                first_name: String::new(),
                last_name: String::new(),
                username: username.to_string(),
                password: "pw1".to_string(),
                email: format!("{username}@example.com"),
                skill: String::new(),
                role: "user".to_string(),
            })
            .await
            .unwrap();

        let claims = Claims {
            username: username.to_string(),
            exp: i64::MAX,
        };

        (profile.id, claims)
    }

    async fn seed_post(pool: &SqlitePool, user_id: i64, title: &str) -> Post {
        PostService::new(pool)
            .create_post(CreatePostRequest {
                title: title.to_string(),
                content: "body".to_string(),
                user_id,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn annotation_tracks_the_like_set() {
        let pool = test_pool().await;
        let service = PostService::new(&pool);

        let (alice_id, alice) = seed_user(&pool, "alice").await;
        let (bob_id, bob) = seed_user(&pool, "bob").await;
        let (carol_id, _) = seed_user(&pool, "carol").await;
        let post = seed_post(&pool, alice_id, "hello").await;

        // Empty like set.
        let view = service.get_post(&alice, post.id).await.unwrap();
        assert!(!view.liked);
        assert_eq!(view.liked_count, 0);

        // Singleton: the viewer themselves.
        service.like_post(alice_id, post.id).await.unwrap();
        let view = service.get_post(&alice, post.id).await.unwrap();
        assert!(view.liked);
        assert_eq!(view.liked_count, 1);

        // Same post through another viewer's eyes.
        let view = service.get_post(&bob, post.id).await.unwrap();
        assert!(!view.liked);
        assert_eq!(view.liked_count, 1);

        // Multi-liker set.
        service.like_post(bob_id, post.id).await.unwrap();
        service.like_post(carol_id, post.id).await.unwrap();
        let view = service.get_post(&alice, post.id).await.unwrap();
        assert!(view.liked);
        assert_eq!(view.liked_count, 3);
    }

    #[tokio::test]
    async fn duplicate_like_is_a_noop() {
        let pool = test_pool().await;
        let service = PostService::new(&pool);

        let (alice_id, alice) = seed_user(&pool, "alice").await;
        let post = seed_post(&pool, alice_id, "hello").await;

        service.like_post(alice_id, post.id).await.unwrap();
        service.like_post(alice_id, post.id).await.unwrap();

        let view = service.get_post(&alice, post.id).await.unwrap();
        assert_eq!(view.liked_count, 1);
    }

    #[tokio::test]
    async fn unlike_of_never_liked_post_is_a_noop() {
        let pool = test_pool().await;
        let service = PostService::new(&pool);

        let (alice_id, alice) = seed_user(&pool, "alice").await;
        let post = seed_post(&pool, alice_id, "hello").await;

        service.unlike_post(alice_id, post.id).await.unwrap();
        let view = service.get_post(&alice, post.id).await.unwrap();
        assert!(!view.liked);
        assert_eq!(view.liked_count, 0);
    }

    #[tokio::test]
    async fn unresolvable_viewer_fails_the_read() {
        let pool = test_pool().await;
        let service = PostService::new(&pool);

        let (alice_id, _) = seed_user(&pool, "alice").await;
        seed_post(&pool, alice_id, "hello").await;

        let stale = Claims {
            username: "deleted-user".to_string(),
            exp: i64::MAX,
        };

        let err = service.list_posts(&stale).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Auth {
                source: AuthError::Unauthenticated(_)
            }
        ));
    }

    #[tokio::test]
    async fn list_preserves_post_order() {
        let pool = test_pool().await;
        let service = PostService::new(&pool);

        let (alice_id, alice) = seed_user(&pool, "alice").await;
        let first = seed_post(&pool, alice_id, "first").await;
        let second = seed_post(&pool, alice_id, "second").await;
        let third = seed_post(&pool, alice_id, "third").await;

        let views = service.list_posts(&alice).await.unwrap();
        let ids: Vec<i64> = views.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }
}
