//! Shared fixtures for handler and middleware tests.

use std::sync::Arc;

use scribe_infra::{InMemoryPostRepository, InMemoryUserRepository, JwtConfig};

use crate::config::{AppConfig, CookieConfig};
use crate::state::AppState;

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: None,
        session: JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 24,
            issuer: "scribe".to_string(),
        },
        cookie: CookieConfig {
            name: "token".to_string(),
            secure: false,
        },
    }
}

/// In-memory state with empty stores.
pub fn test_state() -> AppState {
    test_state_with_posts(Arc::new(InMemoryPostRepository::new()))
}

/// In-memory state around a post store the test keeps a handle to.
pub fn test_state_with_posts(posts: Arc<InMemoryPostRepository>) -> AppState {
    AppState::with_repositories(
        &test_config(),
        Arc::new(InMemoryUserRepository::new()),
        posts,
    )
}
