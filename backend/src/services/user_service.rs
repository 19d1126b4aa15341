//! User business logic service.
//!
//! Owns credential handling (password hashing and verification) and the
//! lifecycle of identities. Plaintext passwords exist only inside a request;
//! only the bcrypt hash ever reaches the repository, and it is never logged.

use crate::database::models::{CreateUser, CreateUserRequest, UpdateUserRequest, User, UserProfile};
use crate::errors::{AuthError, ServiceError, ServiceResult};
use crate::repositories::user_repository::{UserRepository, attach_posts};
use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user with a hashed password.
    ///
    /// Username uniqueness is enforced by the database constraint; the
    /// unique violation is translated to `AlreadyExists` here, so there is
    /// no check-then-insert window.
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<UserProfile> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(
                flatten_validation_errors(validation_errors).join(", "),
            ));
        }

        let password_hash = Self::hash_password(&request.password)?;

        let data = CreateUser {
            username: request.username,
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            role: request.role,
            skill: request.skill,
        };

        let username = data.username.clone();
        let repo = UserRepository::new(self.pool);
        let user = match repo.create_user(data).await {
            Ok(user) => user,
            Err(e) => {
                let err = ServiceError::from(e);
                if err.is_unique_violation() {
                    return Err(ServiceError::already_exists("User", username));
                }
                return Err(err);
            }
        };

        Ok(UserProfile::from(user))
    }

    /// Verifies a username/password pair against the stored credential.
    ///
    /// An unknown username signals `NotFound`, a hash mismatch signals
    /// `BadCredentials`; the auth boundary collapses both to a generic
    /// unauthorized response.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AuthError::BadCredentials.into());
        }

        Ok(user)
    }

    fn hash_password(password: &str) -> ServiceResult<String> {
        hash(password, DEFAULT_COST)
            .map_err(|e| ServiceError::internal(format!("password hashing failed: {e}")))
    }

    fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        verify(password, hash)
            .map_err(|e| ServiceError::internal(format!("password verification failed: {e}")))
    }

    /// Retrieves a user by ID with existence verification.
    pub async fn get_user_required(&self, id: i64) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Public profile of one user, posts included.
    pub async fn get_profile(&self, id: i64) -> ServiceResult<UserProfile> {
        let user = self.get_user_required(id).await?;
        let mut profiles = attach_posts(self.pool, vec![UserProfile::from(user)]).await?;
        profiles
            .pop()
            .ok_or_else(|| ServiceError::internal("profile lost while attaching posts"))
    }

    pub async fn list_users(&self) -> ServiceResult<Vec<UserProfile>> {
        let repo = UserRepository::new(self.pool);
        Ok(repo.list_profiles().await?)
    }

    /// Applies a partial update; a supplied password is re-hashed first.
    pub async fn update_user(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> ServiceResult<UserProfile> {
        let mut user = self.get_user_required(id).await?;

        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(skill) = update.skill {
            user.skill = skill;
        }
        if let Some(active) = update.active {
            user.is_active = active;
        }
        if let Some(password) = update.password {
            user.password_hash = Self::hash_password(&password)?;
        }

        let repo = UserRepository::new(self.pool);
        repo.update_user(&user).await?;

        Ok(UserProfile::from(user))
    }

    pub async fn delete_user(&self, id: i64) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        if repo.delete_user(id).await? == 0 {
            return Err(ServiceError::not_found("User", id));
        }
        Ok(())
    }

    /// Stamps the last-visited timestamp, used after a successful login.
    pub async fn record_visit(&self, id: i64) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        repo.touch_last_visited(id).await?;
        Ok(())
    }
}

/// Flattens validator errors into per-field messages.
pub(crate) fn flatten_validation_errors(errors: validator::ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error.message.as_ref().unwrap_or(&"Invalid value".into())
                )
            })
        })
        .collect()
}
