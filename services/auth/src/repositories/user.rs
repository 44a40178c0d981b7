//! User repository for database operations

use academics::Role;
use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::{PgPool, Row, postgres::PgRow};
use thiserror::Error;
use tracing::info;

use crate::models::{NewProfile, NewUser, User};

/// Failure to create a user
#[derive(Error, Debug)]
pub enum CreateUserError {
    /// Username, email, roll number or employee id already taken
    #[error("Account already exists: {0}")]
    Duplicate(String),

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const USER_COLUMNS: &str = r#"
    u.id, u.username, u.email, u.password_hash, u.full_name, u.role,
    s.id AS student_id, t.id AS teacher_id, u.created_at, u.updated_at
"#;

/// Hash a password with argon2 and a random salt
pub fn hash_password(password: &str) -> Result<String, CreateUserError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CreateUserError::Hashing(e.to_string()))
}

/// Check a password against a stored argon2 hash
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn user_from_row(row: &PgRow) -> Result<User> {
    let role: String = row.try_get("role")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        full_name: row.try_get("full_name")?,
        role: role.parse::<Role>()?,
        student_id: row.try_get("student_id")?,
        teacher_id: row.try_get("teacher_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user and its role profile in one transaction
    pub async fn create(&self, new_user: &NewUser) -> Result<User, CreateUserError> {
        info!("Creating new {} user: {}", new_user.profile.role(), new_user.username);

        let password_hash = hash_password(&new_user.password)?;
        let role = new_user.profile.role();

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, full_name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(&new_user.full_name)
        .bind(role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(duplicate_or_database)?;

        let user_id: uuid::Uuid = row.get("id");
        let mut student_id = None;
        let mut teacher_id = None;

        match &new_user.profile {
            NewProfile::Student {
                roll_no,
                semester,
                department,
                phone_number,
                address,
            } => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO students (user_id, roll_no, semester, department, phone_number, address)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING id
                    "#,
                )
                .bind(user_id)
                .bind(roll_no)
                .bind(semester)
                .bind(department)
                .bind(phone_number)
                .bind(address)
                .fetch_one(&mut *tx)
                .await
                .map_err(duplicate_or_database)?;
                student_id = Some(id);
            }
            NewProfile::Teacher {
                employee_id,
                designation,
                specialization,
            } => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO teachers (user_id, employee_id, designation, specialization)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(user_id)
                .bind(employee_id)
                .bind(designation)
                .bind(specialization)
                .fetch_one(&mut *tx)
                .await
                .map_err(duplicate_or_database)?;
                teacher_id = Some(id);
            }
            NewProfile::Admin => {}
        }

        tx.commit().await?;

        Ok(User {
            id: user_id,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash,
            full_name: new_user.full_name.clone(),
            role,
            student_id,
            teacher_id,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    /// Find a user by email, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        info!("Finding user by email: {}", email);

        let query = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u
            LEFT JOIN students s ON s.user_id = u.id
            LEFT JOIN teachers t ON t.user_id = u.id
            WHERE lower(u.email) = lower($1)
            "#
        );

        let row = sqlx::query(&query)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }
}

fn duplicate_or_database(e: sqlx::Error) -> CreateUserError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            CreateUserError::Duplicate(db.constraint().unwrap_or("unique").to_string())
        }
        _ => CreateUserError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Str0ng!Passw0rd").unwrap();
        assert_ne!(hash, "Str0ng!Passw0rd");
        assert!(verify_password(&hash, "Str0ng!Passw0rd").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("not-a-hash", "anything").is_err());
    }
}
