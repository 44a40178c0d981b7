//! Error types for the academic core
//!
//! Grade aggregation and gating never fail; these errors only surface when
//! parsing tags from the outside world or when the session store misbehaves.

use thiserror::Error;

/// Error parsing a letter grade
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    /// The label is not on the grade-point scale
    #[error("Unknown grade: {0}")]
    Unknown(String),
}

/// Error parsing a role tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    /// The tag does not name a known role
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error validating a session record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Role {0} requires a studentId")]
    MissingStudentId(&'static str),

    #[error("Role {0} requires a teacherId")]
    MissingTeacherId(&'static str),

    /// An identifier belonging to another role was supplied
    #[error("Role {role} must not carry a {field}")]
    UnexpectedIdentifier { role: &'static str, field: &'static str },

    #[error(transparent)]
    Role(#[from] RoleError),
}

/// Error raised by a session store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached or rejected the operation
    #[error("Session store backend error: {0}")]
    Backend(String),

    /// The slot holds data that does not decode into a session
    #[error("Corrupt session slot {slot}: {reason}")]
    Corrupt { slot: String, reason: String },
}

/// Error raised by the session provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The provider has been torn down and no longer accepts changes
    #[error("Session provider has been torn down")]
    TornDown,
}
