//! Error types for the shared infrastructure
//!
//! Each infrastructure concern gets its own error enum so the services can
//! decide which failures become a 5xx and which are worth a retry.

use redis::RedisError;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error raised by database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Error raised by Redis operations
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Unexpected reply to {command}: {reply}")]
    UnexpectedReply { command: &'static str, reply: String },
}

/// Type alias for Result with CacheError
pub type CacheResult<T> = Result<T, CacheError>;

/// Error raised while issuing or validating bearer tokens
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token configuration error: {0}")]
    Configuration(String),

    #[error("Invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("System clock error: {0}")]
    Clock(String),
}
