use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{JwtError, PasswordError, PasswordHasher, TokenService};
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, UserRepository};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Shared by unknown-email and wrong-password outcomes so login is not an existence oracle.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Email is already registered")]
    EmailTaken,

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Email address not found")]
    UnknownEmail,

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for AuthError {
    fn from(err: DatabaseError) -> Self {
        match err {
            // Lost the race between the existence check and the insert
            DatabaseError::UniqueViolation(_) => AuthError::EmailTaken,
            other => AuthError::Database(other),
        }
    }
}

/// Token plus the minimal user projection returned by register and login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

/// Registration, login and password reset over the credential store
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    /// Verified against on unknown-email logins so both failures cost one hash check
    dummy_hash: OnceCell<String>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            dummy_hash: OnceCell::new(),
        }
    }

    pub async fn register(&self, email: Option<&str>, password: Option<&str>) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email).ok_or_else(|| AuthError::Validation("Email is required".to_string()))?;
        if !email.contains('@') {
            return Err(AuthError::Validation("Email address is invalid".to_string()));
        }
        let password = require_password(password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            info!("Registration rejected: email already registered");
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;
        let user = self.users.insert(NewUser { email, password_hash }).await?;
        info!("Registered user {}", user.id);

        self.session_for(&user)
    }

    pub async fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<AuthSession, AuthError> {
        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Validation("Email and password are required".to_string()));
        };
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_by_email(&email).await? else {
            let dummy = self
                .dummy_hash
                .get_or_try_init(|| self.hasher.hash_blocking(Uuid::new_v4().to_string()))
                .await?;
            self.hasher.verify_blocking(password.to_string(), dummy.clone()).await?;
            warn!("Login failed: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?
        {
            warn!("Login failed: wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        self.session_for(&user)
    }

    /// Trust-on-request reset without email verification. A real deployment
    /// needs a verified reset-token flow in front of this.
    pub async fn reset_password(&self, email: Option<&str>, new_password: Option<&str>) -> Result<(), AuthError> {
        let email = normalize_email(email).ok_or_else(|| AuthError::Validation("Email is required".to_string()))?;
        let new_password = require_password(new_password)?;

        let user = self.users.find_by_email(&email).await?.ok_or(AuthError::UnknownEmail)?;

        let password_hash = self.hasher.hash_blocking(new_password.to_string()).await?;
        if !self.users.update_password(user.id, &password_hash).await? {
            return Err(AuthError::UnknownEmail);
        }

        info!("Password reset for user {}", user.id);
        Ok(())
    }

    fn session_for(&self, user: &User) -> Result<AuthSession, AuthError> {
        Ok(AuthSession {
            token: self.tokens.issue(user)?,
            user_id: user.id,
            email: user.email.clone(),
        })
    }
}

/// Trim and lowercase; `None` when absent or blank.
pub fn normalize_email(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn require_password(password: Option<&str>) -> Result<&str, AuthError> {
    match password {
        Some(p) if p.chars().count() >= MIN_PASSWORD_LENGTH => Ok(p),
        _ => Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ))),
    }
}
