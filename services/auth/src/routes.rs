//! Authentication service routes

use academics::Session;
use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::{error, info, warn};

use crate::{
    AppState,
    middleware::require_session,
    models::{AuthResponse, LoginRequest, SignupRequest},
    repositories::{CreateUserError, user::verify_password},
    validation::{validate_login, validate_signup},
};

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/session", get(current_session))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .merge(protected)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);
    let session_store = state.sessions.store_healthy().await;

    Json(serde_json::json!({
        "status": if database && session_store { "ok" } else { "degraded" },
        "service": "auth-service",
        "database": database,
        "sessionStore": session_store
    }))
}

/// Register a user together with its student or teacher profile
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Signup attempt for {} user: {}", payload.role, payload.username);

    validate_signup(&payload).map_err(AuthError::BadRequest)?;
    let new_user = payload.into_new_user().map_err(AuthError::BadRequest)?;

    let user = state
        .user_repository
        .create(&new_user)
        .await
        .map_err(|e| match e {
            CreateUserError::Duplicate(constraint) => {
                warn!("Signup rejected, duplicate on {}", constraint);
                AuthError::Conflict
            }
            other => {
                error!("Failed to create user: {}", other);
                AuthError::InternalServerError
            }
        })?;

    let session = state.sessions.establish(&user).await.map_err(|e| {
        error!("Failed to establish session: {}", e);
        AuthError::InternalServerError
    })?;

    Ok((StatusCode::CREATED, Json(AuthResponse::new(session))))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Login attempt for user: {}", payload.email);

    validate_login(&payload).map_err(AuthError::BadRequest)?;

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            AuthError::InternalServerError
        })?
        .ok_or(AuthError::Unauthorized)?;

    let password_ok = verify_password(&user.password_hash, &payload.password).map_err(|e| {
        error!("Stored password hash for {} is unusable: {}", user.id, e);
        AuthError::InternalServerError
    })?;

    if !password_ok {
        return Err(AuthError::Unauthorized);
    }

    if let Some(expected) = payload.expected_role {
        if expected != user.role {
            warn!(
                "User {} with role {} tried the {} login",
                user.id, user.role, expected
            );
            return Err(AuthError::Forbidden(format!(
                "This account is not registered as {}",
                expected
            )));
        }
    }

    let session = state.sessions.establish(&user).await.map_err(|e| {
        error!("Failed to establish session: {}", e);
        AuthError::InternalServerError
    })?;

    Ok((StatusCode::OK, Json(AuthResponse::new(session))))
}

/// Logout endpoint; succeeds whether or not a live session was ended
pub async fn logout(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Logout request");

    if let Some(TypedHeader(Authorization(bearer))) = bearer {
        state.sessions.end(bearer.token()).await.map_err(|e| {
            error!("Failed to end session: {}", e);
            AuthError::InternalServerError
        })?;
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({"message": "Logged out successfully"})),
    ))
}

/// Session belonging to the bearer token
pub async fn current_session(Extension(session): Extension<Session>) -> Json<Session> {
    Json(session)
}

/// Custom error type for authentication errors
#[derive(Debug)]
pub enum AuthError {
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
    Conflict,
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AuthError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            AuthError::Conflict => (
                StatusCode::CONFLICT,
                "An account with these details already exists".to_string(),
            ),
            AuthError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
