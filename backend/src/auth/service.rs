//! Core business logic for the authentication system.

use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::database::models::{CreateUserRequest, UserProfile, default_role};
use crate::errors::{AuthError, ServiceError, ServiceResult};
use crate::services::user_service::{UserService, flatten_validation_errors};
use crate::utils::jwt::JwtKeys;
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for registration, login, and token issuance.
///
/// The signing keys are built once at startup and handed in; nothing here
/// re-reads configuration per request.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    pub fn new(pool: &'a SqlitePool, jwt: &'a JwtKeys) -> Self {
        AuthService { pool, jwt }
    }

    /// Registers a new identity with the default role.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserProfile> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(
                flatten_validation_errors(validation_errors).join(", "),
            ));
        }

        let user_service = UserService::new(self.pool);
        user_service
            .create_user(CreateUserRequest {
                first_name: request.first_name,
                last_name: request.last_name,
                username: request.username,
                password: request.password,
                email: request.email,
                skill: request.skill,
                role: default_role(),
            })
            .await
    }

    /// Authenticates a credential pair and issues a bearer token.
    ///
    /// An unknown username and a wrong password both come back as
    /// `BadCredentials`; the distinction only survives in the logs.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(
                flatten_validation_errors(validation_errors).join(", "),
            ));
        }

        let user_service = UserService::new(self.pool);
        let user = match user_service
            .authenticate_user(&request.username, &request.password)
            .await
        {
            Ok(user) => user,
            Err(ServiceError::NotFound { .. }) => {
                tracing::warn!(username = %request.username, "login failed: unknown username");
                return Err(AuthError::BadCredentials.into());
            }
            Err(e) => return Err(e),
        };

        user_service.record_visit(user.id).await?;

        let token = self.jwt.issue(&user.username)?;

        Ok(LoginResponse {
            token,
            user: UserProfile::from(user),
        })
    }
}
