pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::user::User;

pub use password::{PasswordError, PasswordHasher};

/// Fixed-shape token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, serialized as a string
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::TokenGeneration("token expiry out of range".to_string()))?;

        Ok(Self {
            sub: user_id.to_string(),
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid token")]
    InvalidToken,
}

/// Issues and validates HS256 tokens for authenticated users.
///
/// Every way a token can be bad (garbage, wrong signature, expired, wrong
/// subject shape) collapses into [`JwtError::InvalidToken`].
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Result<Self, JwtError> {
        let secret = security.jwt_secret.as_bytes();
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let ttl = i64::try_from(security.jwt_expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| JwtError::TokenGeneration("token lifetime out of range".to_string()))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// Issue a token for a freshly authenticated user.
    pub fn issue(&self, user: &User) -> Result<String, JwtError> {
        self.issue_at(user.id, &user.email, Utc::now())
    }

    pub fn issue_at(&self, user_id: Uuid, email: &str, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, email, issued_at, self.ttl)?;
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// True iff the signature verifies and now is strictly before `exp`.
    pub fn validate(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    pub fn identity_of(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
    }

    pub fn email_of(&self, token: &str) -> Result<String, JwtError> {
        Ok(self.decode(token)?.email)
    }

    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected token: {}", e);
                JwtError::InvalidToken
            })?;

        // jsonwebtoken still accepts exp == now
        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!("Rejected token: expired at {}", claims.exp);
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }
}
