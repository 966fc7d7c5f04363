//! Authentication Middleware
//! Mission: Protect product endpoints with JWT validation

use crate::auth::jwt::JwtHandler;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Auth middleware that validates bearer tokens
///
/// Expects `Authorization: Bearer <token>`. Only the presence of a second
/// whitespace-separated segment is checked, not the scheme word itself.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;

    let token = header_value
        .to_str()
        .ok()
        .and_then(|v| v.split_whitespace().nth(1))
        .ok_or(AuthError::MalformedToken)?;

    let claims = jwt_handler.validate_token(token).map_err(|e| {
        error!("JWT verification error: {}", e);
        AuthError::InvalidToken
    })?;

    // Make the verified identity available to handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Auth error types
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    MalformedToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Token missing",
            AuthError::MalformedToken => "Token malformed",
            AuthError::InvalidToken => "Invalid token",
        };

        (StatusCode::FORBIDDEN, Json(json!({ "message": message }))).into_response()
    }
}
