use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable part of a post, as submitted from the admin forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl Post {
    /// Create a new post from a draft.
    pub fn new(draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            body: draft.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit. `id` and `created_at` never change.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.body = draft.body;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_identity() {
        let mut post = Post::new(PostDraft {
            title: "First".to_string(),
            body: "Body".to_string(),
        });
        let (id, created_at) = (post.id, post.created_at);

        post.apply(PostDraft {
            title: "Second".to_string(),
            body: "Edited".to_string(),
        });

        assert_eq!(post.id, id);
        assert_eq!(post.created_at, created_at);
        assert!(post.updated_at >= created_at);
        assert_eq!(post.title, "Second");
        assert_eq!(post.body, "Edited");
    }
}
