//! API layer: response envelope and per-resource routes/handlers.

pub mod common;
pub mod post;
pub mod user;
