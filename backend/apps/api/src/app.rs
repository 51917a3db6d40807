//! Router assembly
//!
//! Request path, outermost first: trace, CORS, security headers,
//! sanitize, rate limit, then the route (posts routes add authenticate).

use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::repository::UserRepository;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::{Router, routing::get};
use platform::rate_limit::{RateLimitConfig, RateLimitState, RateLimitStore, enforce_rate_limit};
use platform::sanitize::sanitize_request;
use platform::security_headers::with_security_headers;
use posts::domain::repository::PostRepository;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Versioned prefix every API route lives under
pub const API_PREFIX: &str = "/api/V1";

pub const WELCOME_TEXT: &str = "Welcome to Blog Website";

/// Services the router is built from
pub struct AppContext<U, P, L> {
    pub users: U,
    pub posts: P,
    pub rate_limit_store: Arc<L>,
    pub rate_limit: RateLimitConfig,
    pub trust_proxy: bool,
    pub auth_config: Arc<AuthConfig>,
    pub frontend_origins: Vec<String>,
}

/// Build the full application router
pub fn build_router<U, P, L>(ctx: AppContext<U, P, L>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let api = Router::new()
        .merge(auth::auth_router_generic(ctx.users, ctx.auth_config.clone()))
        .merge(posts::posts_router_generic(ctx.posts, ctx.auth_config));

    let rate_limit = RateLimitState {
        store: ctx.rate_limit_store,
        config: ctx.rate_limit,
        trust_proxy: ctx.trust_proxy,
    };

    let gated = Router::new()
        .route("/", get(welcome))
        .nest(API_PREFIX, api)
        .layer(from_fn_with_state(rate_limit, enforce_rate_limit::<L>))
        .layer(from_fn(sanitize_request));

    with_security_headers(gated)
        .layer(cors_layer(&ctx.frontend_origins))
        .layer(TraceLayer::new_for_http())
}

/// GET /
async fn welcome() -> &'static str {
    WELCOME_TEXT
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
