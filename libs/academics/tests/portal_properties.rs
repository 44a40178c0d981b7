//! End-to-end checks of aggregation and gating through the public API
//!
//! These exercise the crate the way the services use it: records come in as
//! JSON, sessions come out of a provider, and the gate is evaluated against
//! whatever the provider reports.

use std::sync::Arc;

use academics::{
    GateDecision, Grade, GradeAggregator, MemorySessionStore, Principal, RedirectTarget,
    ResultRecord, Role, Session, SessionGate, SessionProvider, SessionState, Standing,
};
use uuid::Uuid;

fn records_from_json() -> Vec<ResultRecord> {
    serde_json::from_str(
        r#"[
            {"subjectCode": "CS301", "subjectName": "Operating Systems", "credits": 4,
             "semesterNumber": 5, "marksObtained": 82, "maxMarks": 100, "grade": "A"},
            {"subjectCode": "CS101", "subjectName": "Programming", "credits": 4,
             "semesterNumber": 1, "marksObtained": 91, "maxMarks": 100, "grade": "A+"},
            {"subjectCode": "CS302", "subjectName": "Networks", "credits": 3,
             "semesterNumber": 5, "marksObtained": 64, "maxMarks": 100, "grade": "B"},
            {"subjectCode": "HS101", "subjectName": "Ethics", "credits": 2,
             "semesterNumber": 1, "grade": null}
        ]"#,
    )
    .expect("valid records")
}

#[test]
fn test_every_sgpa_is_on_the_twentieth_grid() {
    let records = records_from_json();
    let transcript = GradeAggregator::default().aggregate(&records);

    for semester in &transcript.per_semester {
        assert!(semester.total_credits > 0);
        assert!((0.0..=10.0).contains(&semester.sgpa));

        let weighted: f64 = semester
            .subjects
            .iter()
            .map(|s| s.grade_point() * f64::from(s.credits))
            .sum();
        let expected = (weighted / f64::from(semester.total_credits) * 20.0).round() / 20.0;
        assert_eq!(semester.sgpa, expected);
    }
}

#[test]
fn test_transcript_from_json_records() {
    let transcript = GradeAggregator::default().aggregate(&records_from_json());

    // Semester 1: (4 * 10 + 2 * 0) / 6 = 6.666..., nearest 0.05 is 6.65
    let first = transcript.semester(1).expect("semester 1");
    assert_eq!(first.sgpa, 6.65);
    assert_eq!(first.total_credits, 6);

    // Semester 5: (4 * 9 + 3 * 7) / 7 = 8.142..., nearest 0.05 is 8.15
    let fifth = transcript.semester(5).expect("semester 5");
    assert_eq!(fifth.sgpa, 8.15);

    // Overall: (40 + 0 + 36 + 21) / 13 = 7.461..., nearest 0.05 is 7.45
    assert_eq!(transcript.cgpa, 7.45);
    assert_eq!(transcript.total_credits_overall, 13);
    assert_eq!(transcript.completed_semesters(), 2);
    assert_eq!(transcript.standing(), Standing::Good);
}

#[test]
fn test_grade_scale_reference_matches_points() {
    let record = ResultRecord::new("X", "X", 1, 1, Some(Grade::from_percentage(55.0)));
    assert_eq!(record.grade, Some(Grade::CPlus));
    assert_eq!(record.grade_point(), 6.0);
}

#[tokio::test]
async fn test_gate_follows_provider_lifecycle() {
    let store = Arc::new(MemorySessionStore::new());
    let provider = SessionProvider::new(store, "browser");
    let mut gate = SessionGate::new([Role::Admin]);
    let mut nav: Vec<RedirectTarget> = Vec::new();

    let state = provider.current_session().await;
    assert_eq!(gate.evaluate(&state, "/admin/students", &mut nav), GateDecision::Pending);

    let state = provider.init().await.expect("init");
    assert_eq!(
        gate.evaluate(&state, "/admin/students", &mut nav),
        GateDecision::RedirectLogin
    );

    provider
        .set_session(Session::new(
            Uuid::new_v4(),
            Principal::Student { student_id: 9 },
            "t",
            "Student",
            "s@college.edu",
        ))
        .await
        .expect("set session");
    let state = provider.current_session().await;
    assert_eq!(
        gate.evaluate(&state, "/admin/students", &mut nav),
        GateDecision::RedirectHome
    );
    // Unchanged inputs: no second redirect.
    gate.evaluate(&state, "/admin/students", &mut nav);

    provider
        .set_session(Session::new(
            Uuid::new_v4(),
            Principal::Admin,
            "t2",
            "Admin",
            "a@college.edu",
        ))
        .await
        .expect("set session");
    let state = provider.current_session().await;
    assert_eq!(gate.evaluate(&state, "/admin/students", &mut nav), GateDecision::Render);

    assert_eq!(nav, vec![RedirectTarget::Login, RedirectTarget::Home]);
}

#[test]
fn test_anonymous_is_sent_to_login_for_any_role_list() {
    for allowed in [vec![], vec![Role::Student], vec![Role::Teacher, Role::Admin]] {
        let mut gate = SessionGate::new(allowed);
        let mut nav: Vec<RedirectTarget> = Vec::new();
        let decision = gate.evaluate(&SessionState::Resolved(None), "/student/results", &mut nav);
        assert_eq!(decision, GateDecision::RedirectLogin);
        assert_eq!(nav, vec![RedirectTarget::Login]);
    }
}
