//! In-memory post repository
//!
//! Insertion order doubles as creation order. Each operation holds the
//! lock for its whole read-modify-write, matching the single-statement
//! atomicity of the PostgreSQL store.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::PostChanges;
use crate::error::{StoreError, StoreResult};

#[derive(Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Post>>> {
        self.posts
            .read()
            .map_err(|_| StoreError::Unavailable("post store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Post>>> {
        self.posts
            .write()
            .map_err(|_| StoreError::Unavailable("post store lock poisoned".to_string()))
    }
}

impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> StoreResult<()> {
        self.write()?.push(post.clone());
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Post>> {
        Ok(self.read()?.clone())
    }

    async fn list_by_author(&self, author_id: &UserId) -> StoreResult<Vec<Post>> {
        Ok(self
            .read()?
            .iter()
            .filter(|post| post.is_owned_by(author_id))
            .cloned()
            .collect())
    }

    async fn update_owned(
        &self,
        post_id: &PostId,
        author_id: &UserId,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Post>> {
        let mut posts = self.write()?;
        let Some(post) = posts
            .iter_mut()
            .find(|post| post.id == *post_id && post.is_owned_by(author_id))
        else {
            return Ok(None);
        };

        post.apply(changes, now);
        Ok(Some(post.clone()))
    }

    async fn delete_owned(
        &self,
        post_id: &PostId,
        author_id: &UserId,
    ) -> StoreResult<Option<Post>> {
        let mut posts = self.write()?;
        let position = posts
            .iter()
            .position(|post| post.id == *post_id && post.is_owned_by(author_id));

        Ok(position.map(|index| posts.remove(index)))
    }
}
