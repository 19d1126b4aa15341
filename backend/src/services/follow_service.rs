//! Follow-graph business logic.

use crate::database::models::{FollowRequest, UserProfile};
use crate::errors::ServiceResult;
use crate::repositories::follow_repository::FollowRepository;
use crate::services::user_service::UserService;
use sqlx::SqlitePool;

pub struct FollowService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> FollowService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn follow(&self, request: &FollowRequest) -> ServiceResult<()> {
        let repo = FollowRepository::new(self.pool);
        repo.follow(request.follower_id, request.followed_id)
            .await?;
        Ok(())
    }

    pub async fn unfollow(&self, request: &FollowRequest) -> ServiceResult<()> {
        let repo = FollowRepository::new(self.pool);
        repo.unfollow(request.follower_id, request.followed_id)
            .await?;
        Ok(())
    }

    /// Everyone following `user_id`. The subject user must exist.
    pub async fn followers(&self, user_id: i64) -> ServiceResult<Vec<UserProfile>> {
        UserService::new(self.pool).get_user_required(user_id).await?;

        let repo = FollowRepository::new(self.pool);
        Ok(repo.followers(user_id).await?)
    }

    /// Everyone `user_id` follows. The subject user must exist.
    pub async fn following(&self, user_id: i64) -> ServiceResult<Vec<UserProfile>> {
        UserService::new(self.pool).get_user_required(user_id).await?;

        let repo = FollowRepository::new(self.pool);
        Ok(repo.following(user_id).await?)
    }
}
