//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.

use thiserror::Error;

/// Authentication-layer failures.
///
/// Every variant collapses to a generic unauthorized response at the HTTP
/// boundary, but the kinds stay distinguishable for internal logs.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The Authorization header or the token itself could not be parsed.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The token expiry lies in the past.
    #[error("token expired")]
    Expired,
    /// The token signature does not match the signing secret.
    #[error("bad token signature")]
    BadSignature,
    /// Username/password pair did not match a stored credential.
    #[error("bad credentials")]
    BadCredentials,
    /// A verified claim could not be resolved to a stored identity.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Authentication error: {source}")]
    Auth {
        #[from]
        source: AuthError,
    },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: sqlx::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the underlying database error is a unique-constraint violation.
    ///
    /// Registration relies on the unique index on `users.username` instead of
    /// a separate existence check, so this is how AlreadyExists is detected.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database {
                source: sqlx::Error::Database(db_err),
            } => db_err.is_unique_violation(),
            _ => false,
        }
    }
}
