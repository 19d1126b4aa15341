//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer token on every protected request and stashes the
//! verified claims in the request extensions for handlers to use. All
//! failure kinds (missing header, malformed shape, expired token, bad
//! signature) collapse to 401 for the caller; the specific kind is logged.

use crate::utils::jwt::{JwtKeys, extract_bearer_token};
use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(jwt): Extension<JwtKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!(
                method = %request.method(),
                uri = %request.uri(),
                "rejected request without authorization header"
            );
            StatusCode::UNAUTHORIZED
        })?;

    let token = extract_bearer_token(auth_header).map_err(|e| {
        tracing::warn!(method = %request.method(), uri = %request.uri(), error = %e, "rejected bearer header");
        StatusCode::UNAUTHORIZED
    })?;

    match jwt.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::warn!(method = %request.method(), uri = %request.uri(), error = %e, "token verification failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
