//! User model and related functionality

use academics::{Principal, Role};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User entity joined with its student/teacher profile id
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Principal for the user's role; fails when the profile row is missing
    pub fn principal(&self) -> Result<Principal> {
        match (self.role, self.student_id, self.teacher_id) {
            (Role::Student, Some(student_id), _) => Ok(Principal::Student { student_id }),
            (Role::Teacher, _, Some(teacher_id)) => Ok(Principal::Teacher { teacher_id }),
            (Role::Admin, _, _) => Ok(Principal::Admin),
            (role, _, _) => bail!("User {} has role {} but no matching profile", self.id, role),
        }
    }
}

/// Role-specific profile created alongside a user
#[derive(Debug, Clone, PartialEq)]
pub enum NewProfile {
    Student {
        roll_no: String,
        semester: i32,
        department: String,
        phone_number: Option<String>,
        address: Option<String>,
    },
    Teacher {
        employee_id: String,
        designation: Option<String>,
        specialization: Option<String>,
    },
    Admin,
}

impl NewProfile {
    pub fn role(&self) -> Role {
        match self {
            NewProfile::Student { .. } => Role::Student,
            NewProfile::Teacher { .. } => Role::Teacher,
            NewProfile::Admin => Role::Admin,
        }
    }
}

/// New user creation payload; `password` is plain text and hashed on insert
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub profile: NewProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, student_id: Option<i64>, teacher_id: Option<i64>) -> User {
        User {
            id: Uuid::nil(),
            username: "user".to_string(),
            email: "user@college.edu".to_string(),
            password_hash: String::new(),
            full_name: "User".to_string(),
            role,
            student_id,
            teacher_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_principal_matches_role() {
        assert_eq!(
            user(Role::Student, Some(5), None).principal().unwrap(),
            Principal::Student { student_id: 5 }
        );
        assert_eq!(
            user(Role::Teacher, None, Some(8)).principal().unwrap(),
            Principal::Teacher { teacher_id: 8 }
        );
        assert_eq!(
            user(Role::Admin, None, None).principal().unwrap(),
            Principal::Admin
        );
    }

    #[test]
    fn test_missing_profile_is_an_error() {
        assert!(user(Role::Student, None, None).principal().is_err());
        assert!(user(Role::Teacher, Some(1), None).principal().is_err());
    }
}
