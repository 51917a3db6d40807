//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with username + password
//! - Stateless session tokens (HS256 JWT, 2 hour lifetime)
//! - `authenticate` middleware and `AuthenticatedUser` extractor for
//!   routes owned by other crates
//!
//! ## Security Model
//! - Passwords hashed with bcrypt (cost 10) off the async workers
//! - Token failures are reported with one generic message

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult, InternalError};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::middleware::{AuthenticatedUser, authenticate};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
