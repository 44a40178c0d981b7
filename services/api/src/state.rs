//! Application state shared across handlers

use academics::{GradeAggregator, SessionStore};
use common::token::TokenService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::repositories::ResultSource;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub results: Arc<dyn ResultSource>,
    pub session_store: Arc<dyn SessionStore>,
    pub tokens: TokenService,
    pub aggregator: GradeAggregator,
}
