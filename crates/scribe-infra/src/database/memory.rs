//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Post, PostDraft, User};
use scribe_core::error::RepoError;
use scribe_core::pagination::PageWindow;
use scribe_core::ports::{PostRepository, UserRepository};
use scribe_core::search::SearchTerm;

/// Users keyed by username, which makes the unique constraint free.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}

pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    /// Store a post exactly as given, timestamps included.
    pub async fn insert(&self, post: Post) {
        self.posts.write().await.insert(post.id, post);
    }

    async fn newest_first(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let post = Post::new(draft);
        self.insert(post.clone()).await;
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.apply(draft);
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn list_recent(&self, window: PageWindow) -> Result<Vec<Post>, RepoError> {
        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);

        Ok(self
            .newest_first()
            .await
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.newest_first().await)
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .newest_first()
            .await
            .into_iter()
            .filter(|post| term.matches(post))
            .collect())
    }
}
