//! Platform Crate - Technical Infrastructure
//!
//! Primitives the blog crates build on:
//! - Credential hashing (bcrypt, cost 10)
//! - Session tokens (HS256 JWT, 2 hour lifetime)
//! - Request gate pieces: operator-key sanitizing, fixed-window rate
//!   limiting, security response headers
//! - Client address resolution

pub mod client;
pub mod password;
pub mod rate_limit;
pub mod sanitize;
pub mod security_headers;
pub mod token;
