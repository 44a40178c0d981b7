//! Authenticated session model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::role::Role;

/// Who the session belongs to, with the identifier that matches the role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Student { student_id: i64 },
    Teacher { teacher_id: i64 },
    Admin,
}

impl Principal {
    pub fn role(&self) -> Role {
        match self {
            Principal::Student { .. } => Role::Student,
            Principal::Teacher { .. } => Role::Teacher,
            Principal::Admin => Role::Admin,
        }
    }
}

/// An authenticated principal and its bearer credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    pub user_id: Uuid,
    pub principal: Principal,
    pub token: String,
    pub display_name: String,
    pub email: String,
}

impl Session {
    pub fn new(
        user_id: Uuid,
        principal: Principal,
        token: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            principal,
            token: token.into(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.principal.role()
    }

    pub fn student_id(&self) -> Option<i64> {
        match self.principal {
            Principal::Student { student_id } => Some(student_id),
            _ => None,
        }
    }

    pub fn teacher_id(&self) -> Option<i64> {
        match self.principal {
            Principal::Teacher { teacher_id } => Some(teacher_id),
            _ => None,
        }
    }

    /// Whether `token` is the credential this session was issued with
    pub fn holds_token(&self, token: &str) -> bool {
        self.token == token
    }
}

/// Flat wire shape of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    user_id: Uuid,
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    student_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    teacher_id: Option<i64>,
    token: String,
    display_name: String,
    email: String,
}

impl TryFrom<SessionRecord> for Session {
    type Error = SessionError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let role: Role = record.role.parse()?;

        let principal = match (role, record.student_id, record.teacher_id) {
            (Role::Student, Some(student_id), None) => Principal::Student { student_id },
            (Role::Teacher, None, Some(teacher_id)) => Principal::Teacher { teacher_id },
            (Role::Admin, None, None) => Principal::Admin,
            (Role::Student, Some(_), Some(_)) => {
                return Err(SessionError::UnexpectedIdentifier {
                    role: role.as_str(),
                    field: "teacherId",
                });
            }
            (Role::Teacher, Some(_), Some(_)) => {
                return Err(SessionError::UnexpectedIdentifier {
                    role: role.as_str(),
                    field: "studentId",
                });
            }
            (Role::Student, None, _) => return Err(SessionError::MissingStudentId(role.as_str())),
            (Role::Teacher, _, None) => return Err(SessionError::MissingTeacherId(role.as_str())),
            (_, Some(_), _) => {
                return Err(SessionError::UnexpectedIdentifier {
                    role: role.as_str(),
                    field: "studentId",
                });
            }
            (_, _, Some(_)) => {
                return Err(SessionError::UnexpectedIdentifier {
                    role: role.as_str(),
                    field: "teacherId",
                });
            }
        };

        Ok(Session {
            user_id: record.user_id,
            principal,
            token: record.token,
            display_name: record.display_name,
            email: record.email,
        })
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        SessionRecord {
            user_id: session.user_id,
            role: session.role().as_str().to_string(),
            student_id: session.student_id(),
            teacher_id: session.teacher_id(),
            token: session.token,
            display_name: session.display_name,
            email: session.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student() -> Session {
        Session::new(
            Uuid::nil(),
            Principal::Student { student_id: 42 },
            "token-1",
            "Asha Rao",
            "asha@college.edu",
        )
    }

    #[test]
    fn test_role_derived_from_principal() {
        let session = student();
        assert_eq!(session.role(), Role::Student);
        assert_eq!(session.student_id(), Some(42));
        assert_eq!(session.teacher_id(), None);
        assert!(session.holds_token("token-1"));
        assert!(!session.holds_token("token-2"));
    }

    #[test]
    fn test_serializes_flat_record() {
        let value = serde_json::to_value(student()).unwrap();
        assert_eq!(value["role"], "STUDENT");
        assert_eq!(value["studentId"], 42);
        assert!(value.get("teacherId").is_none());
        assert_eq!(value["displayName"], "Asha Rao");

        let back: Session = serde_json::from_value(value).unwrap();
        assert_eq!(back, student());
    }

    #[test]
    fn test_legacy_teacher_record() {
        let value = json!({
            "userId": Uuid::nil(),
            "role": "PROFESSOR",
            "teacherId": 7,
            "token": "t",
            "displayName": "Dr. Iyer",
            "email": "iyer@college.edu"
        });

        let session: Session = serde_json::from_value(value).unwrap();
        assert_eq!(session.principal, Principal::Teacher { teacher_id: 7 });
        assert_eq!(serde_json::to_value(&session).unwrap()["role"], "TEACHER");
    }

    #[test]
    fn test_rejects_mismatched_identifiers() {
        let missing = json!({
            "userId": Uuid::nil(),
            "role": "STUDENT",
            "token": "t",
            "displayName": "x",
            "email": "x@college.edu"
        });
        assert!(serde_json::from_value::<Session>(missing).is_err());

        let both = json!({
            "userId": Uuid::nil(),
            "role": "ADMIN",
            "studentId": 1,
            "token": "t",
            "displayName": "x",
            "email": "x@college.edu"
        });
        assert!(serde_json::from_value::<Session>(both).is_err());

        let wrong_role = json!({
            "userId": Uuid::nil(),
            "role": "TEACHER",
            "studentId": 1,
            "teacherId": 2,
            "token": "t",
            "displayName": "x",
            "email": "x@college.edu"
        });
        assert!(serde_json::from_value::<Session>(wrong_role).is_err());
    }

    #[test]
    fn test_extra_identifier_is_named() {
        let record = |role: &str| SessionRecord {
            user_id: Uuid::nil(),
            role: role.to_string(),
            student_id: Some(1),
            teacher_id: Some(2),
            token: "t".to_string(),
            display_name: "x".to_string(),
            email: "x@college.edu".to_string(),
        };

        assert_eq!(
            Session::try_from(record("STUDENT")),
            Err(SessionError::UnexpectedIdentifier {
                role: "STUDENT",
                field: "teacherId",
            })
        );
        assert_eq!(
            Session::try_from(record("PROFESSOR")),
            Err(SessionError::UnexpectedIdentifier {
                role: "TEACHER",
                field: "studentId",
            })
        );
        assert_eq!(
            Session::try_from(record("ADMIN")),
            Err(SessionError::UnexpectedIdentifier {
                role: "ADMIN",
                field: "studentId",
            })
        );
    }
}
