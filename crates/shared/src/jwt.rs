//! JWT token utilities.
//!
//! Access and refresh tokens are signed with HS256 using a single shared
//! secret. Access tokens carry the user's role so route authorization does
//! not need a database round trip; refresh tokens carry the user id only.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User role, present on access tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token type (access or refresh)
    pub token_type: TokenType,
}

/// Type of JWT token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Default access token lifetime: 24 hours.
pub const DEFAULT_ACCESS_EXPIRY_SECS: i64 = 86_400;
/// Default refresh token lifetime: 7 days.
pub const DEFAULT_REFRESH_EXPIRY_SECS: i64 = 604_800;
/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    pub access_token_expiry_secs: i64,
    pub refresh_token_expiry_secs: i64,
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("refresh_token_expiry_secs", &self.refresh_token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a new JwtConfig from the signing secret.
    pub fn new(
        secret: &str,
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
        leeway_secs: u64,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry_secs,
            refresh_token_expiry_secs,
            leeway_secs,
        }
    }

    /// Creates a JwtConfig with the default 24h/7d expiries.
    pub fn with_defaults(secret: &str) -> Self {
        Self::new(
            secret,
            DEFAULT_ACCESS_EXPIRY_SECS,
            DEFAULT_REFRESH_EXPIRY_SECS,
            DEFAULT_LEEWAY_SECS,
        )
    }

    /// Generates an access token carrying the user id and role.
    pub fn generate_access_token(&self, user_id: Uuid, role: &str) -> Result<String, JwtError> {
        self.generate_token(
            user_id,
            Some(role.to_string()),
            TokenType::Access,
            self.access_token_expiry_secs,
        )
    }

    /// Generates a refresh token carrying the user id only.
    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.generate_token(
            user_id,
            None,
            TokenType::Refresh,
            self.refresh_token_expiry_secs,
        )
    }

    fn generate_token(
        &self,
        user_id: Uuid,
        role: Option<String>,
        token_type: TokenType,
        expiry_secs: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validates an access token specifically.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }

    /// Validates a refresh token specifically.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }
}

/// Extracts the user ID from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}
