//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::value_objects::PostChanges;

/// A blog post
///
/// `author_id` is fixed at creation and is the only key for mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `author_id`
    pub fn new(title: String, content: String, author_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            title,
            content,
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` may mutate or delete this post
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.author_id == *user_id
    }

    /// Apply changes; `updated_at` moves only when something was supplied
    pub fn apply(&mut self, changes: &PostChanges, now: DateTime<Utc>) {
        if changes.is_empty() {
            return;
        }
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(content) = &changes.content {
            self.content = content.clone();
        }
        self.updated_at = now;
    }
}
