//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration and login and are designed to be
//! integrated into the main Axum router. Everything else in the API sits
//! behind the JWT middleware instead.

use crate::auth::handlers::{login, register};
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
