//! Blog API
//!
//! Assembles the auth and posts crates behind the request gate and exposes
//! them under `/api/V1`. The `blog-server` binary wires this to PostgreSQL.

pub mod app;
pub mod config;
pub mod telemetry;

pub use app::{AppContext, build_router};
pub use config::{AppConfig, ConfigError};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
