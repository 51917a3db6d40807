//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::entities::Post;
use crate::domain::value_objects::PostChanges;
use crate::error::StoreResult;

/// Post repository trait
///
/// Listings are ordered by creation time, oldest first.
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Persist a new post
    async fn create(&self, post: &Post) -> StoreResult<()>;

    /// Every post
    async fn list_all(&self) -> StoreResult<Vec<Post>>;

    /// Posts written by `author_id`
    async fn list_by_author(&self, author_id: &UserId) -> StoreResult<Vec<Post>>;

    /// Update the post matching both `post_id` and `author_id`
    ///
    /// Returns `None` when no such owned post exists. Lookup and write are
    /// a single atomic step.
    async fn update_owned(
        &self,
        post_id: &PostId,
        author_id: &UserId,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Post>>;

    /// Delete the post matching both `post_id` and `author_id`
    ///
    /// Returns the deleted post, or `None` when no such owned post exists.
    async fn delete_owned(&self, post_id: &PostId, author_id: &UserId)
    -> StoreResult<Option<Post>>;
}
