//! API models for response payloads

use academics::{ResultRecord, Role, Session, Standing, Transcript};
use serde::Serialize;
use uuid::Uuid;

use crate::repositories::ResultStats;

/// Response of `GET /students/:student_id/cgpa`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CgpaResponse {
    pub cgpa: f64,
    pub standing: Standing,
    pub completed_semesters: usize,
    pub total_credits: u32,
}

impl From<&Transcript> for CgpaResponse {
    fn from(transcript: &Transcript) -> Self {
        Self {
            cgpa: transcript.cgpa,
            standing: transcript.standing(),
            completed_semesters: transcript.completed_semesters(),
            total_credits: transcript.total_credits_overall,
        }
    }
}

/// Response of `GET /me`; the bearer token is not echoed back
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: Uuid,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    pub display_name: String,
    pub email: String,
    pub dashboard_path: &'static str,
}

impl From<Session> for MeResponse {
    fn from(session: Session) -> Self {
        let role = session.role();
        Self {
            user_id: session.user_id,
            role,
            student_id: session.student_id(),
            teacher_id: session.teacher_id(),
            display_name: session.display_name,
            email: session.email,
            dashboard_path: role.dashboard_path(),
        }
    }
}

/// Response of `GET /student/dashboard`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub student_id: i64,
    pub display_name: String,
    #[serde(flatten)]
    pub summary: CgpaResponse,
    /// Most recent semester with results, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_semester: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_sgpa: Option<f64>,
    pub recent_results: Vec<ResultRecord>,
}

impl StudentDashboard {
    pub fn new(session: &Session, student_id: i64, transcript: Transcript) -> Self {
        let summary = CgpaResponse::from(&transcript);
        let latest = transcript.per_semester.into_iter().next_back();

        Self {
            student_id,
            display_name: session.display_name.clone(),
            summary,
            latest_semester: latest.as_ref().map(|semester| semester.semester_number),
            latest_sgpa: latest.as_ref().map(|semester| semester.sgpa),
            recent_results: latest.map(|semester| semester.subjects).unwrap_or_default(),
        }
    }
}

/// Response of `GET /teacher/dashboard`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDashboard {
    pub teacher_id: i64,
    pub display_name: String,
    pub email: String,
    pub total_students: i64,
    pub results_published: i64,
}

/// Response of `GET /admin/dashboard`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_students: i64,
    pub active_students: i64,
    pub results_published: i64,
}

impl From<ResultStats> for AdminDashboard {
    fn from(stats: ResultStats) -> Self {
        Self {
            total_students: stats.total_students,
            active_students: stats.students_with_results,
            results_published: stats.results_published,
        }
    }
}
