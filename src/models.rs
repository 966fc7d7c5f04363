//! Shared Configuration

use anyhow::{Context, Result};

/// Process configuration, loaded once at startup and injected into the
/// stores, token handler, and router. Handlers never read the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub jwt_secret: String,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./stockroom.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let cors_origin =
            std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            database_path,
            port,
            jwt_secret,
            cors_origin,
        })
    }
}
