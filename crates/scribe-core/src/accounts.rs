//! Registration and login.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::User;
use crate::error::{ConflictError, RepoError};
use crate::ports::{AuthError, CredentialFailure, PasswordService, UserRepository};

/// Errors from the account flows.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AccountError {
    fn from(err: RepoError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

/// Account operations over the credential store and the password hasher.
///
/// Hashing runs on the blocking pool so request tasks keep moving.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Create an account with a freshly hashed password.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AccountError> {
        if username.trim().is_empty() {
            return Err(AccountError::Validation("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(AccountError::Validation("Password is required".to_string()));
        }

        let password_hash = self.hash(password.to_string()).await?;
        let user = User::new(username.to_string(), password_hash);

        match self.users.create(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User registered");
                Ok(user)
            }
            Err(RepoError::Constraint(_)) => {
                tracing::info!(username, "Registration refused, username taken");
                Err(ConflictError::DuplicateUsername(username.to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords both come back as
    /// [`AuthError::BadCredentials`], tagged with the actual cause.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AccountError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::info!(username, "Login refused, no such user");
            return Err(AuthError::BadCredentials(CredentialFailure::UnknownUser).into());
        };

        if !self
            .verify(password.to_string(), user.password_hash.clone())
            .await?
        {
            tracing::info!(user_id = %user.id, "Login refused, password mismatch");
            return Err(AuthError::BadCredentials(CredentialFailure::PasswordMismatch).into());
        }

        tracing::info!(user_id = %user.id, "Login accepted");
        Ok(user)
    }

    async fn hash(&self, password: String) -> Result<String, AccountError> {
        let passwords = Arc::clone(&self.passwords);
        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?
            .map_err(hashing_fault)
    }

    async fn verify(&self, password: String, hash: String) -> Result<bool, AccountError> {
        let passwords = Arc::clone(&self.passwords);
        tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?
            .map_err(hashing_fault)
    }
}

fn hashing_fault(err: AuthError) -> AccountError {
    AccountError::Internal(err.to_string())
}
