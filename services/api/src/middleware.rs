//! Gate middleware guarding role-restricted routes
//!
//! Each request resolves its session from the bearer token and runs a fresh
//! [`SessionGate`]. Redirect decisions become `303 See Other` responses, so
//! a browser lands on the login page or home exactly as a client-side gate
//! would send it there.

use academics::{
    GateDecision, Navigator, RedirectTarget, Role, SessionGate, SessionState,
};
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{error::ApiError, state::AppState};

/// State of one gated route group
#[derive(Clone)]
pub struct GateLayerState {
    pub app: AppState,
    /// Empty admits any authenticated role
    pub allowed_roles: &'static [Role],
}

impl GateLayerState {
    pub fn new(app: AppState, allowed_roles: &'static [Role]) -> Self {
        Self { app, allowed_roles }
    }
}

/// Remembers where the gate wanted to go
#[derive(Debug, Default)]
struct PendingRedirect(Option<RedirectTarget>);

impl Navigator for PendingRedirect {
    fn navigate(&mut self, target: RedirectTarget) {
        self.0 = Some(target);
    }
}

fn see_other(target: RedirectTarget) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, target.path())]).into_response()
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Gate a request by session and role
pub async fn session_gate(
    State(gate): State<GateLayerState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let session = match bearer_token(&req) {
        Some(token) => common::resolve_session(
            &gate.app.tokens,
            gate.app.session_store.clone(),
            &token,
        )
        .await
        .map_err(|e| {
            error!("Failed to resolve session: {}", e);
            ApiError::InternalServerError
        })?,
        None => None,
    };

    let state = SessionState::Resolved(session);
    let mut session_gate = SessionGate::new(gate.allowed_roles.iter().copied());
    let mut redirect = PendingRedirect::default();
    let decision = session_gate.evaluate(&state, req.uri().path(), &mut redirect);

    match (decision, redirect.0) {
        (GateDecision::Render, _) => {
            if let SessionState::Resolved(Some(session)) = state {
                req.extensions_mut().insert(session);
            }
            Ok(next.run(req).await)
        }
        (GateDecision::Pending, _) => Err(ApiError::SessionUnavailable),
        (_, Some(target)) => Ok(see_other(target)),
        // Redirect suppressed because the visitor is already there
        (GateDecision::RedirectLogin, None) => Err(ApiError::Unauthorized),
        (GateDecision::RedirectHome, None) => {
            Err(ApiError::Forbidden("Role not permitted".to_string()))
        }
    }
}
