//! Portal roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RoleError;

/// Role of an authenticated principal.
///
/// `TEACHER` is the canonical tag. The older `PROFESSOR` tag is still
/// accepted on input and maps to [`Role::Teacher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

/// Legacy tag for [`Role::Teacher`]
pub const LEGACY_TEACHER_TAG: &str = "PROFESSOR";

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    /// Canonical wire tag
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Admin => "ADMIN",
        }
    }

    /// Landing page after login
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Student => "/student/dashboard",
            Role::Teacher => "/teacher/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STUDENT" => Ok(Role::Student),
            "TEACHER" | LEGACY_TEACHER_TAG => Ok(Role::Teacher),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = RoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
