//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{LoginRequest, LoginResponse, RegisterRequest},
    password,
    user_store::{CreateUserError, UserStore},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Register endpoint - POST /register
pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AuthApiError> {
    let Some((username, password)) = credentials(payload.username, payload.password) else {
        return Err(AuthApiError::MissingCredentials);
    };

    // Courtesy pre-check; the UNIQUE index below is the real guard
    let existing = state
        .user_store
        .find_by_username(&username)
        .map_err(|e| AuthApiError::internal("Failed to register user", e))?;
    if existing.is_some() {
        return Err(AuthApiError::UsernameTaken);
    }

    let password_hash = password::hash_password(&password)
        .map_err(|e| AuthApiError::internal("Failed to register user", e))?;

    match state.user_store.create_user(&username, password_hash) {
        Ok(user) => {
            info!("✅ Registered user: {}", user.username);
            Ok((
                StatusCode::CREATED,
                Json(json!({ "message": "User created successfully!" })),
            ))
        }
        Err(CreateUserError::DuplicateUsername) => {
            // A concurrent registration won the race
            warn!("Registration race lost for username: {}", username);
            Err(AuthApiError::UsernameTaken)
        }
        Err(CreateUserError::Other(e)) => Err(AuthApiError::internal("Failed to register user", e)),
    }
}

/// Login endpoint - POST /login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let Some((username, password)) = credentials(payload.username, payload.password) else {
        return Err(AuthApiError::MissingCredentials);
    };

    info!("🔐 Login attempt: {}", username);

    let user = state
        .user_store
        .find_by_username(&username)
        .map_err(|e| AuthApiError::internal("Failed to login", e))?;

    // Unknown user and wrong password are deliberately indistinguishable
    let valid = match &user {
        Some(user) => password::verify_password(&password, &user.password_hash)
            .map_err(|e| AuthApiError::internal("Failed to login", e))?,
        None => false,
    };

    if !valid {
        warn!("❌ Failed login attempt: {}", username);
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = state
        .jwt_handler
        .generate_token(&username)
        .map_err(|e| AuthApiError::internal("Failed to login", e))?;

    info!("✅ Login successful: {}", username);

    Ok(Json(LoginResponse { token }))
}

/// Both fields present and non-empty, or nothing
fn credentials(username: Option<String>, password: Option<String>) -> Option<(String, String)> {
    match (username, password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
        _ => None,
    }
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    MissingCredentials,
    InvalidCredentials,
    UsernameTaken,
    Internal {
        public: &'static str,
        source: anyhow::Error,
    },
}

impl AuthApiError {
    fn internal(public: &'static str, source: anyhow::Error) -> Self {
        Self::Internal { public, source }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                "Username and password are required",
            ),
            AuthApiError::InvalidCredentials => (StatusCode::BAD_REQUEST, "Invalid credentials"),
            AuthApiError::UsernameTaken => (StatusCode::BAD_REQUEST, "Username already exists"),
            AuthApiError::Internal { public, source } => {
                // Details stay server-side; the client gets the generic message
                error!("Auth error: {:#}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, public)
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
