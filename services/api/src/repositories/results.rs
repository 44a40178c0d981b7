//! Result repository backed by PostgreSQL

use academics::{Grade, ResultRecord};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::{info, warn};

use super::{ResultSource, ResultStats};

/// Result repository for database operations
#[derive(Clone)]
pub struct ResultRepository {
    pool: PgPool,
}

impl ResultRepository {
    /// Create a new result repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Credits or semester numbers below zero cannot be weighed; they count as 0
fn non_negative(value: i32, column: &str, subject_code: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        warn!("Negative {} {} on subject {}", column, value, subject_code);
        0
    })
}

fn record_from_row(row: &PgRow) -> Result<ResultRecord> {
    let subject_code: String = row.try_get("subject_code")?;
    let credits: i32 = row.try_get("credits")?;
    let semester_number: i32 = row.try_get("semester_number")?;
    let grade: Option<String> = row.try_get("grade")?;

    let grade = grade.as_deref().and_then(|label| {
        let parsed = Grade::parse_lenient(label);
        if parsed.is_none() {
            warn!("Unknown grade {:?} on subject {}", label, subject_code);
        }
        parsed
    });

    Ok(ResultRecord {
        credits: non_negative(credits, "credits", &subject_code),
        semester_number: non_negative(semester_number, "semester", &subject_code),
        subject_name: row.try_get("subject_name")?,
        marks_obtained: row.try_get("marks_obtained")?,
        max_marks: row.try_get("max_marks")?,
        grade,
        subject_code,
    })
}

#[async_trait]
impl ResultSource for ResultRepository {
    async fn student_exists(&self, student_id: i64) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE id = $1)")
                .bind(student_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn results_for_student(&self, student_id: i64) -> Result<Vec<ResultRecord>> {
        info!("Loading results for student: {}", student_id);

        let rows = sqlx::query(
            r#"
            SELECT s.code AS subject_code, s.name AS subject_name, s.credits,
                   r.semester_number, r.marks_obtained, r.max_marks, r.grade
            FROM results r
            JOIN subjects s ON s.id = r.subject_id
            WHERE r.student_id = $1
            ORDER BY r.semester_number, s.code
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn stats(&self) -> Result<ResultStats> {
        let row = sqlx::query(
            r#"
            SELECT (SELECT COUNT(*) FROM students) AS total_students,
                   (SELECT COUNT(DISTINCT student_id) FROM results) AS students_with_results,
                   (SELECT COUNT(*) FROM results) AS results_published
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ResultStats {
            total_students: row.try_get("total_students")?,
            students_with_results: row.try_get("students_with_results")?,
            results_published: row.try_get("results_published")?,
        })
    }
}
