//! Request and response payloads of the auth endpoints

use academics::{Role, Session};
use serde::{Deserialize, Serialize};

use super::user::{NewProfile, NewUser};

/// Request body of `POST /auth/signup`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: Role,
    // Student fields
    #[serde(default)]
    pub roll_no: Option<String>,
    #[serde(default)]
    pub semester: Option<u32>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    // Teacher fields
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SignupRequest {
    /// `fullName` if given, otherwise first and last name joined
    pub fn display_name(&self) -> Option<String> {
        if let Some(full_name) = non_blank(&self.full_name) {
            return Some(full_name);
        }

        let parts: Vec<String> = [non_blank(&self.first_name), non_blank(&self.last_name)]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Build the user to insert; the request must have passed validation
    pub fn into_new_user(self) -> Result<NewUser, String> {
        let full_name = self
            .display_name()
            .ok_or_else(|| "Full name is required".to_string())?;

        let profile = match self.role {
            Role::Student => NewProfile::Student {
                roll_no: non_blank(&self.roll_no)
                    .ok_or_else(|| "Roll number is required for students".to_string())?,
                semester: self
                    .semester
                    .and_then(|s| i32::try_from(s).ok())
                    .filter(|s| *s > 0)
                    .ok_or_else(|| "Semester must be a positive number".to_string())?,
                department: non_blank(&self.department)
                    .ok_or_else(|| "Department is required for students".to_string())?,
                phone_number: non_blank(&self.phone_number),
                address: non_blank(&self.address),
            },
            Role::Teacher => NewProfile::Teacher {
                employee_id: non_blank(&self.employee_id)
                    .ok_or_else(|| "Employee id is required for teachers".to_string())?,
                designation: non_blank(&self.designation),
                specialization: non_blank(&self.specialization),
            },
            Role::Admin => NewProfile::Admin,
        };

        Ok(NewUser {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_ascii_lowercase(),
            password: self.password,
            full_name,
            profile,
        })
    }
}

/// Request body of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Set by role-specific login pages; a different role is refused
    #[serde(default)]
    pub expected_role: Option<Role>,
}

/// Response of signup and login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub session: Session,
    pub redirect_to: &'static str,
}

impl AuthResponse {
    pub fn new(session: Session) -> Self {
        let redirect_to = session.role().dashboard_path();
        Self {
            session,
            redirect_to,
        }
    }
}
