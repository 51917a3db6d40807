//! Rate Limiting Infrastructure
//!
//! Fixed-window request budgets keyed by client address. Windows are
//! aligned to multiples of the window length, so every key rolls over at
//! the same boundary and the counter restarts from zero.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::error::app_error::AppError;
use thiserror::Error;

use crate::client::client_key;

/// Above this many tracked keys, stale windows are pruned on insert
const PRUNE_THRESHOLD: usize = 1024;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    /// 50 requests per 15 minutes
    fn default() -> Self {
        Self {
            max_requests: 50,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    /// Start of the window containing `now_ms`
    pub fn window_start(&self, now_ms: i64) -> i64 {
        let window_ms = self.window_ms().max(1);
        now_ms.div_euclid(window_ms) * window_ms
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("Rate limit store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count this request against `key` and report whether it fits the budget
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError>;
}

// ============================================================================
// In-process store
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct WindowCounter {
    window_start_ms: i64,
    count: u32,
}

/// Counters held in process memory
///
/// The map lock covers read-increment-write, so concurrent bursts from
/// one key cannot undercount.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    counters: Mutex<HashMap<String, WindowCounter>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_and_increment_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> Result<RateLimitResult, RateLimitError> {
        let window_start_ms = config.window_start(now_ms);

        let mut counters = self
            .counters
            .lock()
            .map_err(|e| RateLimitError::Unavailable(e.to_string()))?;

        if counters.len() >= PRUNE_THRESHOLD && !counters.contains_key(key) {
            counters.retain(|_, c| c.window_start_ms == window_start_ms);
        }

        let counter = counters.entry(key.to_string()).or_insert(WindowCounter {
            window_start_ms,
            count: 0,
        });

        if counter.window_start_ms != window_start_ms {
            *counter = WindowCounter {
                window_start_ms,
                count: 0,
            };
        }

        counter.count = counter.count.saturating_add(1);
        let count = counter.count;

        Ok(RateLimitResult {
            allowed: count <= config.max_requests,
            limit: config.max_requests,
            remaining: config.max_requests.saturating_sub(count),
            reset_at_ms: window_start_ms + config.window_ms(),
        })
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.counters.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, RateLimitError> {
        self.check_and_increment_at(key, config, Utc::now().timestamp_millis())
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Middleware state
pub struct RateLimitState<S> {
    pub store: Arc<S>,
    pub config: RateLimitConfig,
    /// Honour `X-Forwarded-For` when keying requests
    pub trust_proxy: bool,
}

impl<S> Clone for RateLimitState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            trust_proxy: self.trust_proxy,
        }
    }
}

/// Reject requests beyond the per-client budget with 429
pub async fn enforce_rate_limit<S>(
    State(state): State<RateLimitState<S>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let key = client_key(req.headers(), direct_ip, state.trust_proxy);

    let result = match state.store.check_and_increment(&key, &state.config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Rate limit check failed");
            return AppError::internal("Internal Server Error").into_response();
        }
    };

    if !result.allowed {
        tracing::warn!(client = %key, limit = result.limit, "Rate limit exceeded");

        let mut response = AppError::too_many_requests("Too many requests, please try again later.")
            .into_response();
        let retry_after_secs = (result.reset_at_ms - Utc::now().timestamp_millis()).max(0) / 1000 + 1;
        response.headers_mut().insert(
            axum::http::header::RETRY_AFTER,
            HeaderValue::from(retry_after_secs),
        );
        apply_headers(&mut response, &result);
        return response;
    }

    let mut response = next.run(req).await;
    apply_headers(&mut response, &result);
    response
}

fn apply_headers(response: &mut Response, result: &RateLimitResult) {
    let headers = response.headers_mut();
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(result.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(result.remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(result.reset_at_ms / 1000));
}
