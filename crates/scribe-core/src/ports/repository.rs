use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostDraft, User};
use crate::error::RepoError;
use crate::pagination::PageWindow;
use crate::search::SearchTerm;

/// Credential store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. A taken username fails with [`RepoError::Constraint`].
    async fn create(&self, user: User) -> Result<User, RepoError>;
}

/// Post store.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post; the store assigns the id and timestamps.
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Replace title and body and bump `updated_at`.
    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Post, RepoError>;

    /// Remove a post permanently. Unknown ids fail with [`RepoError::NotFound`].
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Total number of posts.
    async fn count(&self) -> Result<u64, RepoError>;

    /// One window of posts, newest first.
    async fn list_recent(&self, window: PageWindow) -> Result<Vec<Post>, RepoError>;

    /// Every post, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts whose title or body contains the term, ignoring case.
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Post>, RepoError>;
}
