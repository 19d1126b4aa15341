pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
