//! HTTP Router
//! Mission: Assemble public and token-protected routes

use crate::auth::{api as auth_api, auth_middleware, AuthState};
use crate::products::{api as products_api, ProductStore};
use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state for product handlers
#[derive(Clone)]
pub struct AppState {
    pub product_store: Arc<ProductStore>,
}

/// Create the API router
///
/// Register/login and the health check are public; every product route
/// sits behind the auth middleware. CORS is pinned to the one configured
/// origin.
pub fn create_router(
    app_state: AppState,
    auth_state: AuthState,
    cors_origin: &str,
) -> Result<Router> {
    let origin: HeaderValue = cors_origin.parse().context("Invalid CORS origin")?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/register", post(auth_api::register))
        .route("/login", post(auth_api::login))
        .with_state(auth_state.clone());

    let protected_routes = Router::new()
        .route(
            "/products",
            post(products_api::create_product).get(products_api::list_products),
        )
        .route(
            "/products/:id",
            put(products_api::update_product).delete(products_api::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            auth_state.jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(app_state);

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

// ===== Error Handling =====

/// Product API errors
#[derive(Debug)]
pub enum ApiError {
    Validation(&'static str),
    NotFound(&'static str),
    Internal {
        public: &'static str,
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(public: &'static str, source: anyhow::Error) -> Self {
        Self::Internal { public, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal { public, source } => {
                // Details stay server-side; the client gets the generic message
                tracing::error!("Store error: {:#}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, public)
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
