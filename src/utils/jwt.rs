use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::AuthPayload;

/// JWT Claims structure: the login payload plus token metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    #[serde(flatten)]
    pub payload: AuthPayload,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims valid for `expiration_hours` from now
    pub fn new(payload: AuthPayload, expiration_hours: i64) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            sub: payload.id.to_string(),
            payload,
            iat: now,
            exp: now + expiration_hours * 3600,
        }
    }
}

/// Generates a signed HS256 token for the given payload
pub fn generate_token(payload: AuthPayload, secret: &str, expiration_hours: i64) -> AppResult<String> {
    let claims = Claims::new(payload, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Validates and decodes a JWT token
pub fn validate_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })
}

/// Signs and verifies tokens with the configured secret and lifetime.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: String,
    expiration_hours: i64,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    pub fn issue(&self, payload: AuthPayload) -> AppResult<String> {
        generate_token(payload, &self.secret, self.expiration_hours)
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        validate_token(token, &self.secret)
    }
}

impl From<&JwtConfig> for TokenIssuer {
    fn from(config: &JwtConfig) -> Self {
        Self::new(config.secret.clone(), config.expiration)
    }
}
