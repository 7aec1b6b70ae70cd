//! Authentication ports: password hashing, session tokens, revocation.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

/// Claims carried by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: Uuid,
    /// Unique per issued token, used as the revocation key.
    pub token_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies stateless session tokens.
pub trait SessionTokens: Send + Sync {
    /// Sign a new token for a user.
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify a token's signature, issuer and expiry and decode its claims.
    ///
    /// Every failure is reported as [`AuthError::InvalidOrMissing`].
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// How long an issued token stays valid.
    fn lifetime(&self) -> TimeDelta;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    ///
    /// `Ok(false)` means the password does not match; `Err` means the hash
    /// could not be processed at all.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Tokens revoked before their natural expiry (logout).
#[async_trait]
pub trait SessionDenylist: Send + Sync {
    /// Reject `token_id` until `until` has passed.
    async fn revoke(&self, token_id: Uuid, until: DateTime<Utc>);

    /// Whether `token_id` is currently revoked.
    async fn is_revoked(&self, token_id: Uuid) -> bool;
}

/// Why a username/password pair was refused.
///
/// Both variants produce the same message for the end user; they only
/// differ in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownUser,
    PasswordMismatch,
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session token invalid or missing")]
    InvalidOrMissing,

    #[error("Invalid credentials")]
    BadCredentials(CredentialFailure),

    #[error("Token signing error: {0}")]
    Signing(String),

    #[error("Hashing error: {0}")]
    Hashing(String),
}
