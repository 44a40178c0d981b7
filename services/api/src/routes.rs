//! API service routes

use academics::{Principal, Role, Session, Transcript, grade::GRADE_SCALE};
use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tracing::{error, warn};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{GateLayerState, session_gate},
    models::{AdminDashboard, CgpaResponse, MeResponse, StudentDashboard, TeacherDashboard},
    repositories::ResultStats,
    state::AppState,
};

const RESULT_READERS: &[Role] = &[Role::Student, Role::Teacher, Role::Admin];

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let results_routes = Router::new()
        .route("/students/:student_id/results", get(get_results))
        .route("/students/:student_id/cgpa", get(get_cgpa))
        .route_layer(middleware::from_fn_with_state(
            GateLayerState::new(state.clone(), RESULT_READERS),
            session_gate,
        ));

    let student_routes = Router::new()
        .route("/student/dashboard", get(student_dashboard))
        .route_layer(middleware::from_fn_with_state(
            GateLayerState::new(state.clone(), &[Role::Student]),
            session_gate,
        ));

    let teacher_routes = Router::new()
        .route("/teacher/dashboard", get(teacher_dashboard))
        .route_layer(middleware::from_fn_with_state(
            GateLayerState::new(state.clone(), &[Role::Teacher]),
            session_gate,
        ));

    let admin_routes = Router::new()
        .route("/admin/dashboard", get(admin_dashboard))
        .route_layer(middleware::from_fn_with_state(
            GateLayerState::new(state.clone(), &[Role::Admin]),
            session_gate,
        ));

    let member_routes = Router::new()
        .route("/grade-scale", get(grade_scale))
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            GateLayerState::new(state.clone(), &[]),
            session_gate,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(results_routes)
        .merge(student_routes)
        .merge(teacher_routes)
        .merge(admin_routes)
        .merge(member_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let database = common::database::health_check(&state.db_pool).await?;
    let session_store = state.session_store.health_check().await.unwrap_or_else(|e| {
        error!("Session store health check failed: {}", e);
        false
    });

    Ok(Json(json!({
        "status": if database && session_store { "ok" } else { "degraded" },
        "service": "api-service",
        "database": database,
        "sessionStore": session_store
    })))
}

/// Students only see their own results; staff see everyone's
fn ensure_can_read(session: &Session, student_id: i64) -> ApiResult<()> {
    match session.principal {
        Principal::Student { student_id: own } if own != student_id => {
            warn!(
                "Student {} tried to read results of student {}",
                own, student_id
            );
            Err(ApiError::Forbidden(
                "Students may only view their own results".to_string(),
            ))
        }
        _ => Ok(()),
    }
}

async fn load_transcript(state: &AppState, student_id: i64) -> ApiResult<Transcript> {
    let exists = state
        .results
        .student_exists(student_id)
        .await
        .map_err(|e| {
            error!("Failed to look up student {}: {}", student_id, e);
            ApiError::InternalServerError
        })?;

    if !exists {
        return Err(ApiError::NotFound(format!("Student {} not found", student_id)));
    }

    let records = state
        .results
        .results_for_student(student_id)
        .await
        .map_err(|e| {
            error!("Failed to load results for student {}: {}", student_id, e);
            ApiError::InternalServerError
        })?;

    Ok(state.aggregator.aggregate(&records))
}

/// Per-semester SGPA and overall CGPA of a student
pub async fn get_results(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(student_id): Path<i64>,
) -> ApiResult<Json<Transcript>> {
    ensure_can_read(&session, student_id)?;
    Ok(Json(load_transcript(&state, student_id).await?))
}

/// CGPA summary of a student
pub async fn get_cgpa(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(student_id): Path<i64>,
) -> ApiResult<Json<CgpaResponse>> {
    ensure_can_read(&session, student_id)?;
    let transcript = load_transcript(&state, student_id).await?;
    Ok(Json(CgpaResponse::from(&transcript)))
}

async fn load_stats(state: &AppState) -> ApiResult<ResultStats> {
    state.results.stats().await.map_err(|e| {
        error!("Failed to load result statistics: {}", e);
        ApiError::InternalServerError
    })
}

/// CGPA summary and latest semester of the signed-in student
pub async fn student_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<StudentDashboard>> {
    let student_id = session
        .student_id()
        .ok_or_else(|| ApiError::Forbidden("No student profile".to_string()))?;

    let transcript = load_transcript(&state, student_id).await?;
    Ok(Json(StudentDashboard::new(&session, student_id, transcript)))
}

pub async fn teacher_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<TeacherDashboard>> {
    let teacher_id = session
        .teacher_id()
        .ok_or_else(|| ApiError::Forbidden("No teacher profile".to_string()))?;

    let stats = load_stats(&state).await?;
    Ok(Json(TeacherDashboard {
        teacher_id,
        display_name: session.display_name,
        email: session.email,
        total_students: stats.total_students,
        results_published: stats.results_published,
    }))
}

pub async fn admin_dashboard(State(state): State<AppState>) -> ApiResult<Json<AdminDashboard>> {
    Ok(Json(AdminDashboard::from(load_stats(&state).await?)))
}

pub async fn grade_scale() -> impl IntoResponse {
    Json(GRADE_SCALE)
}

pub async fn me(Extension(session): Extension<Session>) -> Json<MeResponse> {
    Json(MeResponse::from(session))
}
