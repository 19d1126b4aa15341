//! Main entry point for the blog backend.
//!
//! Initializes logging, loads configuration, sets up the database
//! connection, and starts the Axum web server.

use anyhow::Context;
use backend::app;
use backend::config::Config;
use backend::database::Database;
use backend::utils::jwt::JwtKeys;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let jwt = JwtKeys::from_config(&config);

    let router = app(db.pool().clone(), jwt);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    info!("Starting blog backend on port {}", config.server_port);
    axum::serve(listener, router).await?;

    Ok(())
}
