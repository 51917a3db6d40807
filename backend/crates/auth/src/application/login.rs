//! Login Use Case
//!
//! Authenticates a user and issues a session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Signed session token
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Inputs that could never have been registered are plain bad credentials.
        let user_name =
            UserName::new(input.user_name).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await
            .map_err(AuthError::Login)?
            .ok_or(AuthError::InvalidCredentials)?;

        let stored_hash = user.password_hash.clone();
        let password_valid = tokio::task::spawn_blocking(move || stored_hash.verify(&password))
            .await
            .map_err(|e| AuthError::Login(e.into()))?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .config
            .tokens
            .issue(user.user_id, user.user_name.as_str())
            .map_err(|e| AuthError::Login(e.into()))?;

        tracing::info!(
            user_id = %user.user_id,
            expires_at = %issued.expires_at,
            "User logged in"
        );

        Ok(LoginOutput {
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}
