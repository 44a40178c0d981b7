//! Authentication service models

pub mod auth;
pub mod user;

// Re-export for convenience
pub use auth::{AuthResponse, LoginRequest, SignupRequest};
pub use user::{NewProfile, NewUser, User};
