//! Middleware resolving the bearer token into a session

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::AppState;

/// Bearer token of a request, if it carries one
pub fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Require a live session; the session is added to the request extensions
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let session = state
        .sessions
        .resolve(&token)
        .await
        .map_err(|e| {
            error!("Failed to resolve session: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
