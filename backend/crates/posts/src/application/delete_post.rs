//! Delete Post Use Case

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostOperation, PostResult};

pub struct DeletePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Delete an owned post, returning it as it was
    pub async fn execute(&self, post_id: PostId, author_id: UserId) -> PostResult<Post> {
        let post = self
            .repo
            .delete_owned(&post_id, &author_id)
            .await
            .map_err(PostError::store(PostOperation::Delete))?
            .ok_or(PostError::NotFound)?;

        tracing::info!(
            post_id = %post.id,
            author_id = %author_id,
            "Post deleted"
        );

        Ok(post)
    }
}
