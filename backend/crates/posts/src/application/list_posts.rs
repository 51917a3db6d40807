//! List Posts Use Case

use std::sync::Arc;

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::ListScope;
use crate::error::{PostError, PostOperation, PostResult};

pub struct ListPostsUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> ListPostsUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, scope: ListScope) -> PostResult<Vec<Post>> {
        let posts = match scope {
            ListScope::All => self
                .repo
                .list_all()
                .await
                .map_err(PostError::store(PostOperation::ListAll))?,
            ListScope::Author(author_id) => self
                .repo
                .list_by_author(&author_id)
                .await
                .map_err(PostError::store(PostOperation::ListOwn))?,
        };

        tracing::debug!(?scope, count = posts.len(), "Listed posts");

        Ok(posts)
    }
}
