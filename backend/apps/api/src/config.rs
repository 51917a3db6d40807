//! Process configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::fmt;

use platform::rate_limit::RateLimitConfig;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 50;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub port: u16,
    pub rate_limit: RateLimitConfig,
    /// Key rate limits on `X-Forwarded-For` instead of the peer address
    pub trust_proxy: bool,
    /// CORS allow-list; empty means no cross-origin access
    pub frontend_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name-to-value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL")
            .or_else(|| get("MONGODB_URL"))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let max_requests = parse_or(
            "RATE_LIMIT_MAX_REQUESTS",
            get("RATE_LIMIT_MAX_REQUESTS"),
            DEFAULT_RATE_LIMIT_MAX_REQUESTS,
        )?;
        let window_secs = parse_or(
            "RATE_LIMIT_WINDOW_SECS",
            get("RATE_LIMIT_WINDOW_SECS"),
            DEFAULT_RATE_LIMIT_WINDOW_SECS,
        )?;
        if window_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "RATE_LIMIT_WINDOW_SECS",
                value: "0".to_string(),
            });
        }
        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            get("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_DATABASE_MAX_CONNECTIONS,
        )?;

        let trust_proxy = match get("TRUST_PROXY") {
            None => false,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "TRUST_PROXY",
                value,
            })?,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            port,
            rate_limit: RateLimitConfig::new(max_requests, window_secs),
            trust_proxy,
            frontend_origins,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &"[REDACTED]")
            .field("port", &self.port)
            .field("rate_limit", &self.rate_limit)
            .field("trust_proxy", &self.trust_proxy)
            .field("frontend_origins", &self.frontend_origins)
            .finish()
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
