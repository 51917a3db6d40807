//! Auth Middleware
//!
//! Resolves the `Authorization` header into an [`AuthenticatedUser`]
//! stored in request extensions. The middleware itself never rejects a
//! request without a header; handlers decide through the extractor.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, OptionalFromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::error::AuthError;

/// Identity attached to a request carrying a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Token part of an `Authorization` value
///
/// Accepts both the bare token and `Bearer <token>` (scheme matched
/// case-insensitively). Returns `None` for a blank value or a bare scheme,
/// which count as no header at all.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

/// Middleware that verifies a presented token
///
/// - no header: passes through with no identity
/// - valid token: attaches [`AuthenticatedUser`]
/// - anything else: 401 with a generic message
pub async fn authenticate(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = match req.headers().get(header::AUTHORIZATION).map(|v| v.to_str()) {
        None => None,
        Some(Ok(value)) => token_from_header(value).map(str::to_owned),
        Some(Err(_)) => return AuthError::InvalidToken.into_response(),
    };

    let Some(token) = token else {
        return next.run(req).await;
    };

    match config.tokens.verify(&token) {
        Ok(claims) => {
            tracing::debug!(user_id = %claims.user_id, "Request authenticated");
            req.extensions_mut().insert(AuthenticatedUser {
                user_id: claims.user_id,
                username: claims.username,
            });
            next.run(req).await
        }
        Err(_) => AuthError::InvalidToken.into_response(),
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthenticatedUser>().cloned())
    }
}
