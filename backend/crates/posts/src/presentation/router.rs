//! Posts Router

use axum::{Router, routing::get};
use std::sync::Arc;

use auth::{AuthConfig, authenticate};

use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgPostRepository;
use crate::presentation::handlers::{self, PostsAppState};

/// Create the posts router with PostgreSQL repository
pub fn posts_router(repo: PgPostRepository, auth_config: Arc<AuthConfig>) -> Router {
    posts_router_generic(repo, auth_config)
}

/// Create a generic posts router for any repository implementation
///
/// Every route runs behind `authenticate`; handlers decide whether an
/// identity is required.
pub fn posts_router_generic<R>(repo: R, auth_config: Arc<AuthConfig>) -> Router
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let state = PostsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/blog-posts",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route(
            "/blog-posts/{id}",
            axum::routing::put(handlers::update_post::<R>).delete(handlers::delete_post::<R>),
        )
        .route_layer(axum::middleware::from_fn_with_state(auth_config, authenticate))
        .with_state(state)
}
