//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`:
//! session tokens, password hashing, repositories and view rendering.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! Without `postgres` only the in-memory repositories are built.

pub mod auth;
pub mod database;
pub mod views;

pub use auth::{Argon2PasswordService, InMemorySessionDenylist, JwtConfig, JwtSessionTokens};
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};
pub use views::JsonViewRenderer;

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};
