//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{CredentialsRequest, LoginResponse, MessageResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// POST /api/V1/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = RegisterUseCase::new(state.repo.clone());
    use_case
        .execute(RegisterInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "User registered Successfully".to_string(),
    }))
}

/// POST /api/V1/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(LoginInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}
