//! Presentation Layer
//!
//! HTTP handlers and DTOs for the API.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PostsAppState;
pub use router::{posts_router, posts_router_generic};
