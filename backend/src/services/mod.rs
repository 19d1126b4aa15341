//! Business logic layer between the HTTP handlers and the repositories.

pub mod follow_service;
pub mod post_service;
pub mod user_service;
