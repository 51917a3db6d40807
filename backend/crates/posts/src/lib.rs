//! Posts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post entity, value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Ownership Model
//! - A post's author is fixed at creation
//! - Update and delete filter on post id AND author in one store call;
//!   a post owned by someone else reads as not found

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entities::Post;
pub use error::{PostError, PostResult, StoreError};
pub use infra::{InMemoryPostRepository, PgPostRepository};
pub use presentation::router::{posts_router, posts_router_generic};

#[cfg(test)]
mod tests;
