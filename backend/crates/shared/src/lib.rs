//! Shared Kernel - vocabulary every blog crate agrees on
//!
//! - Error classification and the unified [`error::app_error::AppError`]
//! - Typed identifiers for users and posts
//!
//! Only things with the same meaning in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
