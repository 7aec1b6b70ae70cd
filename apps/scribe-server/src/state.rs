//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::AccountService;
use scribe_core::ports::{
    PasswordService, PostRepository, SessionDenylist, SessionTokens, UserRepository, ViewRenderer,
};
use scribe_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemorySessionDenylist,
    InMemoryUserRepository, JsonViewRenderer, JwtSessionTokens,
};

use crate::config::{AppConfig, CookieConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub accounts: Arc<AccountService>,
    pub sessions: Arc<dyn SessionTokens>,
    pub denylist: Arc<dyn SessionDenylist>,
    pub views: Arc<dyn ViewRenderer>,
    pub cookie: CookieConfig,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without `DATABASE_URL` the server keeps everything in memory.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) = {
            use scribe_infra::{PostgresPostRepository, PostgresUserRepository};

            if let Some(db_config) = &config.database {
                let conn = Arc::new(scribe_infra::database::connect(db_config).await?);
                (
                    Arc::new(PostgresUserRepository::new(Arc::clone(&conn))),
                    Arc::new(PostgresPostRepository::new(conn)),
                )
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory_repositories()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory_repositories()
        };

        let state = Self::with_repositories(config, users, posts);
        tracing::info!("Application state initialized");

        Ok(state)
    }

    /// Assemble state around the given repositories.
    pub fn with_repositories(
        config: &AppConfig,
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            accounts: Arc::new(AccountService::new(users, passwords)),
            posts,
            sessions: Arc::new(JwtSessionTokens::new(config.session.clone())),
            denylist: Arc::new(InMemorySessionDenylist::new()),
            views: Arc::new(JsonViewRenderer),
            cookie: config.cookie.clone(),
        }
    }
}

fn in_memory_repositories() -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
    (
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
    )
}
