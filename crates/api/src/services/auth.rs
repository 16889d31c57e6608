//! Authentication service for operator login, registration, and token refresh.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use domain::models::{Role, User, UserProfile};
use persistence::repositories::UserRepository;
use shared::jwt::{extract_user_id, JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Result of a successful login or registration.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    /// Creates a new AuthService over the given pool and JWT configuration.
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt,
        }
    }

    /// Login with email and password.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// endpoint cannot be used to probe for registered addresses.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let user = self
            .users
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        let user: User = user.into();

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_tokens(user)
    }

    /// Register a new operator account. New accounts are always VIEWER;
    /// role changes are out of band. No tokens are issued here: the new
    /// operator signs in through the normal login flow.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, AuthError> {
        let email = email.to_lowercase();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        let created = self
            .users
            .create(&email, &password_hash, name, Role::Viewer.as_str())
            .await;

        // Unique violation covers the concurrent-registration race
        if let Err(sqlx::Error::Database(db_err)) = &created {
            if db_err.code().as_deref() == Some("23505") {
                return Err(AuthError::EmailAlreadyExists);
            }
        }

        let user: User = created?.into();
        Ok(user.into())
    }

    /// Exchange a refresh token for a fresh access token.
    ///
    /// The role is re-read from the database, so a role change takes effect
    /// on the next refresh rather than waiting out the refresh expiry.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self
            .jwt
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;
        let user_id = extract_user_id(&claims).map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let user: User = user.into();

        Ok(self.jwt.generate_access_token(user.id, user.role.as_str())?)
    }

    /// Current user projection for the /me endpoint.
    pub async fn me(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let user: User = user.into();
        Ok(user.into())
    }

    fn issue_tokens(&self, user: User) -> Result<AuthResult, AuthError> {
        let access_token = self.jwt.generate_access_token(user.id, user.role.as_str())?;
        let refresh_token = self.jwt.generate_refresh_token(user.id)?;

        Ok(AuthResult {
            user: user.into(),
            access_token,
            refresh_token,
        })
    }
}
