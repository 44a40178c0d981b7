//! Repositories for database operations

use academics::ResultRecord;
use anyhow::Result;
use async_trait::async_trait;

pub mod results;

pub use results::ResultRepository;

/// Portal-wide counts shown on staff dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultStats {
    pub total_students: i64,
    /// Students with at least one published result
    pub students_with_results: i64,
    pub results_published: i64,
}

/// Where published results come from
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Whether a student profile with this id exists
    async fn student_exists(&self, student_id: i64) -> Result<bool>;

    /// Every published result of a student, oldest semester first
    async fn results_for_student(&self, student_id: i64) -> Result<Vec<ResultRecord>>;

    async fn stats(&self) -> Result<ResultStats>;
}
