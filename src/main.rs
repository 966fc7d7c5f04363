//! Stockroom - Token-Authenticated Product CRUD Backend
//! Mission: Serve registration, login, and product management over HTTP

use anyhow::{Context, Result};
use std::sync::Arc;
use stockroom_backend::{
    api::routes::{create_router, AppState},
    auth::{AuthState, JwtHandler, UserStore},
    models::Config,
    products::ProductStore,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let user_store = Arc::new(UserStore::new(&config.database_path)?);
    let product_store = Arc::new(ProductStore::new(&config.database_path)?);
    info!("💾 Connected to database at {}", config.database_path);

    let jwt_handler = Arc::new(JwtHandler::new(config.jwt_secret.clone()));

    let app = create_router(
        AppState { product_store },
        AuthState::new(user_store, jwt_handler),
        &config.cors_origin,
    )?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter overrides
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockroom_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
