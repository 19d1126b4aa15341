//! Data access layer: one repository per aggregate.

pub mod follow_repository;
pub mod post_repository;
pub mod user_repository;
