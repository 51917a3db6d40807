//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::AuthenticatedUser;
use kernel::id::PostId;

use crate::application::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, ListPostsUseCase, UpdatePostInput,
    UpdatePostUseCase,
};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::ListScope;
use crate::error::{PostError, PostResult};
use crate::presentation::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

/// Shared state for post handlers
#[derive(Clone)]
pub struct PostsAppState<R>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// Ids that do not parse cannot name a post
fn parse_post_id(raw: &str) -> PostResult<PostId> {
    raw.parse().map_err(|_| PostError::NotFound)
}

/// GET /api/V1/blog-posts
///
/// Anonymous callers get every post; authenticated callers get their own.
pub async fn list_posts<R>(
    State(state): State<PostsAppState<R>>,
    user: Option<AuthenticatedUser>,
) -> PostResult<Json<Vec<PostResponse>>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let scope = match user {
        Some(user) => ListScope::Author(user.user_id),
        None => ListScope::All,
    };

    let posts = ListPostsUseCase::new(state.repo.clone())
        .execute(scope)
        .await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// POST /api/V1/blog-posts
pub async fn create_post<R>(
    State(state): State<PostsAppState<R>>,
    user: AuthenticatedUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> PostResult<(StatusCode, Json<PostResponse>)>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let post = CreatePostUseCase::new(state.repo.clone())
        .execute(CreatePostInput {
            title: req.title,
            content: req.content,
            author_id: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// PUT /api/V1/blog-posts/{id}
pub async fn update_post<R>(
    State(state): State<PostsAppState<R>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;
    let Json(req) = payload?;

    let post = UpdatePostUseCase::new(state.repo.clone())
        .execute(UpdatePostInput {
            post_id,
            author_id: user.user_id,
            changes: req.into(),
        })
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /api/V1/blog-posts/{id}
pub async fn delete_post<R>(
    State(state): State<PostsAppState<R>>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;

    let post = DeletePostUseCase::new(state.repo.clone())
        .execute(post_id, user.user_id)
        .await?;

    Ok(Json(post.into()))
}
