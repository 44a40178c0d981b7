//! Bearer token issuing and validation
//!
//! Tokens are HS256 JWTs carrying the user id and role. The token is also
//! stored inside the persisted session, so a token that validates but no
//! longer matches its slot has been invalidated by a logout or a newer login.

use academics::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::error::TokenError;

/// Token configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Token lifetime in seconds (default: 1 day)
    pub expiry_seconds: u64,
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: HMAC secret, at least 32 bytes
    /// - `JWT_EXPIRY_SECONDS`: Token lifetime in seconds (default: 86400)
    pub fn from_env() -> Result<Self, TokenError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| {
            TokenError::Configuration("JWT_SECRET environment variable not set".to_string())
        })?;

        if secret.len() < 32 {
            return Err(TokenError::Configuration(
                "JWT_SECRET must be at least 32 bytes long".to_string(),
            ));
        }

        let expiry_seconds = std::env::var("JWT_EXPIRY_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);

        Ok(TokenConfig {
            secret,
            expiry_seconds,
        })
    }
}

/// Claims carried by a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Issues and validates bearer tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_seconds: u64,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        TokenService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiry_seconds: config.expiry_seconds,
        }
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TokenError::Clock(e.to_string()))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            role,
            iat: now,
            exp: now + self.expiry_seconds,
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Validate a token and return the claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    pub fn expiry_seconds(&self) -> u64 {
        self.expiry_seconds
    }
}
