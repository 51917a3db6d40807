//! User Entity
//!
//! An account record: created at registration, never mutated afterwards.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::user_name::UserName;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique, for login and display)
    pub user_name: UserName,
    /// bcrypt hash; never leaves the server
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, password_hash: HashedPassword) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
