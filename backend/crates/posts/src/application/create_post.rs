//! Create Post Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostOperation, PostResult};

/// Create post input
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    /// Caller's identity, taken from the verified token
    pub author_id: UserId,
}

pub struct CreatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreatePostInput) -> PostResult<Post> {
        let post = Post::new(input.title, input.content, input.author_id);

        self.repo
            .create(&post)
            .await
            .map_err(PostError::store(PostOperation::Create))?;

        tracing::info!(
            post_id = %post.id,
            author_id = %post.author_id,
            "Post created"
        );

        Ok(post)
    }
}
