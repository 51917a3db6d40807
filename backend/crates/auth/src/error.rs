//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Clients only ever see
//! the fixed public message of a variant; detail stays in the server log.

use std::borrow::Cow;

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type for store and primitive failures
pub type InternalResult<T> = Result<T, InternalError>;

/// Failures below the use cases: store, hashing, signing
#[derive(Debug, Error)]
pub enum InternalError {
    /// Database error (including unique violations on user name)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// bcrypt failed
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordHashError),

    /// JWT signing failed
    #[error("Token signing failed: {0}")]
    Token(#[from] TokenError),

    /// Blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Non-database store failure
    #[error("Store error: {0}")]
    Store(String),
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed schema checks
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unknown user name or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Protected route called without a token
    #[error("Missing authorization token")]
    MissingToken,

    /// Token failed signature or expiry checks
    #[error("Invalid authorization token")]
    InvalidToken,

    /// Registration hit a store or hashing failure
    #[error("Registration failed: {0}")]
    Registration(#[source] InternalError),

    /// Login hit a store, hashing or signing failure
    #[error("Login failed: {0}")]
    Login(#[source] InternalError),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Registration(_) | AuthError::Login(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message returned to the client
    pub fn public_message(&self) -> Cow<'static, str> {
        match self {
            AuthError::Validation(detail) => Cow::Owned(detail.clone()),
            AuthError::InvalidCredentials => Cow::Borrowed("Invalid Username or Password"),
            AuthError::MissingToken => Cow::Borrowed("Unauthorized User"),
            AuthError::InvalidToken => {
                Cow::Borrowed("Something Went Wrong Please Check Your Details")
            }
            AuthError::Registration(_) => {
                Cow::Borrowed("Try After Sometime Internal Server Error")
            }
            AuthError::Login(_) => Cow::Borrowed("Login Failure Please Try Again"),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Registration(e) => {
                tracing::error!(error = %e, "Registration failed");
            }
            AuthError::Login(e) => {
                tracing::error!(error = %e, "Login failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected invalid authorization token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(AppError::from(rejection).message().to_string())
    }
}
