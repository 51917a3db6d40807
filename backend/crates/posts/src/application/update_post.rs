//! Update Post Use Case
//!
//! Only the author may update a post. A post that exists but belongs to
//! someone else is indistinguishable from a missing one.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{PostId, UserId};

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::PostChanges;
use crate::error::{PostError, PostOperation, PostResult};

/// Update post input
pub struct UpdatePostInput {
    pub post_id: PostId,
    pub author_id: UserId,
    pub changes: PostChanges,
}

pub struct UpdatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> UpdatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: UpdatePostInput) -> PostResult<Post> {
        let post = self
            .repo
            .update_owned(&input.post_id, &input.author_id, &input.changes, Utc::now())
            .await
            .map_err(PostError::store(PostOperation::Update))?
            .ok_or(PostError::NotFound)?;

        tracing::info!(
            post_id = %post.id,
            author_id = %input.author_id,
            "Post updated"
        );

        Ok(post)
    }
}
