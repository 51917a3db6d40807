//! User Name Value Object
//!
//! The unique handle an account registers and logs in with.
//!
//! ## Invariants
//! - Surrounding whitespace is trimmed before validation
//! - Length: 1 to 64 characters after trimming
//! - No control characters
//!
//! Case is preserved and significant: `Alice` and `alice` are distinct.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

// ============================================================================
// Error Types
// ============================================================================

/// User name validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after trimming
    Empty,

    /// User name is too long
    TooLong { length: usize, max: usize },

    /// User name contains a control character
    ControlCharacter { position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::ControlCharacter { position } => {
                write!(f, "Username contains a control character at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let trimmed = input.as_ref().trim();
        Self::validate(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Create from a stored value
    ///
    /// Stored names passed validation on the way in, so this only re-checks.
    pub fn from_db(stored: &str) -> Result<Self, UserNameError> {
        Self::new(stored)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some(position) = name.chars().position(char::is_control) {
            return Err(UserNameError::ControlCharacter { position });
        }

        Ok(())
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
