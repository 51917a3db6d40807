//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::{TOKEN_TTL, TokenService};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Issues and verifies session tokens
    pub tokens: TokenService,
}

impl AuthConfig {
    /// Config with the standard 2 hour token lifetime
    pub fn new(token_secret: &[u8]) -> Self {
        Self::with_token_ttl(token_secret, TOKEN_TTL)
    }

    /// Config with a custom token lifetime
    pub fn with_token_ttl(token_secret: &[u8], ttl: Duration) -> Self {
        Self {
            tokens: TokenService::with_ttl(token_secret, ttl),
        }
    }
}
