//! In-memory session denylist.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::ports::SessionDenylist;

/// Revoked token ids, each kept until the token would have expired anyway.
///
/// Lives in process memory: revocations are lost on restart, and each
/// server instance keeps its own list.
pub struct InMemorySessionDenylist {
    revoked: RwLock<HashMap<Uuid, DateTime<Utc>>>,
}

impl InMemorySessionDenylist {
    pub fn new() -> Self {
        Self {
            revoked: RwLock::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        let now = Utc::now();
        self.revoked
            .read()
            .await
            .values()
            .filter(|until| **until > now)
            .count()
    }
}

impl Default for InMemorySessionDenylist {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionDenylist for InMemorySessionDenylist {
    async fn revoke(&self, token_id: Uuid, until: DateTime<Utc>) {
        let now = Utc::now();
        let mut revoked = self.revoked.write().await;

        // Expired tokens fail verification on their own
        revoked.retain(|_, expiry| *expiry > now);
        if until > now {
            revoked.insert(token_id, until);
        }
    }

    async fn is_revoked(&self, token_id: Uuid) -> bool {
        let revoked = self.revoked.read().await;
        revoked
            .get(&token_id)
            .is_some_and(|until| *until > Utc::now())
    }
}
