//! Post Error Types
//!
//! This module provides post-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use std::borrow::Cow;
use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Post-specific result type alias
pub type PostResult<T> = Result<T, PostError>;

/// Result type for repository calls
pub type StoreResult<T> = Result<T, StoreError>;

/// Repository failure
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Non-database store failure
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Operation a store failure happened in; selects the public message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOperation {
    ListAll,
    ListOwn,
    Create,
    Update,
    Delete,
}

impl PostOperation {
    fn public_message(self) -> &'static str {
        match self {
            PostOperation::ListAll | PostOperation::Delete => "Something Went Wrong",
            PostOperation::ListOwn | PostOperation::Create => "Internal Server Error",
            PostOperation::Update => "Something Bad Happen",
        }
    }
}

impl fmt::Display for PostOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PostOperation::ListAll => "list all posts",
            PostOperation::ListOwn => "list own posts",
            PostOperation::Create => "create post",
            PostOperation::Update => "update post",
            PostOperation::Delete => "delete post",
        };
        f.write_str(name)
    }
}

/// Post-specific error variants
#[derive(Debug, Error)]
pub enum PostError {
    /// Request body failed schema checks
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No post with this id owned by the caller (or a malformed id)
    #[error("Blog post not found")]
    NotFound,

    /// Store failure during `operation`
    #[error("Failed to {operation}: {source}")]
    Store {
        operation: PostOperation,
        #[source]
        source: StoreError,
    },
}

impl PostError {
    /// Wrap a store failure with the operation it interrupted
    pub fn store(operation: PostOperation) -> impl FnOnce(StoreError) -> PostError {
        move |source| PostError::Store { operation, source }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::Validation(_) => ErrorKind::BadRequest,
            PostError::NotFound => ErrorKind::NotFound,
            PostError::Store { .. } => ErrorKind::InternalServerError,
        }
    }

    /// Message returned to the client
    pub fn public_message(&self) -> Cow<'static, str> {
        match self {
            PostError::Validation(detail) => Cow::Owned(detail.clone()),
            PostError::NotFound => Cow::Borrowed("Blog post not found"),
            PostError::Store { operation, .. } => Cow::Borrowed(operation.public_message()),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PostError::Store { operation, source } => {
                tracing::error!(%operation, error = %source, "Post store error");
            }
            _ => {
                tracing::debug!(error = %self, "Post error");
            }
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for PostError {
    fn from(rejection: JsonRejection) -> Self {
        PostError::Validation(AppError::from(rejection).message().to_string())
    }
}
