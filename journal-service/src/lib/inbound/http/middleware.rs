use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::auth::models::UserId;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extension type to store the authenticated session in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub uid: UserId,
    pub name: String,
    pub email: String,
    pub expires_at: i64,
}

/// Middleware that validates session tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    // Parse failures are uniform; the reason is not surfaced to the caller
    let claims = state.token_codec.parse(token).map_err(|e| {
        tracing::warn!("Session token rejected: {}", e);
        unauthorized("invalid or expired token")
    })?;

    let uid = UserId::from_string(&claims.user_uid).map_err(|e| {
        tracing::error!("Failed to parse user uid from token: {}", e);
        unauthorized("invalid token format")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        uid,
        name: claims.name,
        email: claims.email,
        expires_at: claims.expires_at,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("missing authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("invalid authorization header"))?;

    auth_str
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("invalid authorization header format, expected: Bearer <token>"))
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
