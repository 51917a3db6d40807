//! Password Hashing and Verification
//!
//! bcrypt with a fixed work factor of 10. Each hash carries its own random
//! salt, so hashing the same plaintext twice yields different strings that
//! both verify.
//!
//! ## Security Features
//! - Plaintext is zeroized when dropped and redacted in `Debug`
//! - Verification never errors: any mismatch or malformed hash is `false`
//! - Inputs beyond bcrypt's 72-byte limit are refused instead of truncated

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// bcrypt work factor (2^10 rounds)
pub const BCRYPT_COST: u32 = 10;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Password shape violations, detected before any hashing happens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Hashing failure; fatal to the request that triggered it
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] bcrypt::BcryptError),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Plaintext password as received from a client
///
/// Not `Clone`, so the secret is never copied around by accident.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        if raw.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: raw.len(),
            });
        }

        Ok(Self(raw))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with a freshly generated salt
    ///
    /// CPU-bound (tens of milliseconds); async callers should run it on a
    /// blocking thread.
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let hash = bcrypt::hash(self.as_bytes(), BCRYPT_COST)?;
        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Modular-crypt bcrypt string, e.g. `$2b$10$...`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a hash loaded from the store
    ///
    /// Not validated here: a corrupt value simply never verifies.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Compare a candidate against this hash
    ///
    /// bcrypt compares digests in constant time.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new(raw.to_string()).unwrap()
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new(String::new());
        assert_eq!(result.unwrap_err(), PasswordPolicyError::Empty);
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("a".repeat(MAX_PASSWORD_BYTES + 1));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));

        assert!(ClearTextPassword::new("a".repeat(MAX_PASSWORD_BYTES)).is_ok());
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        assert!(ClearTextPassword::new("pw1".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let pw = password("TestPassword123!");
        let hashed = pw.hash().unwrap();

        assert!(hashed.verify(&pw));
        assert!(!hashed.verify(&password("WrongPassword123!")));
    }

    #[test]
    fn test_same_plaintext_hashes_differently() {
        let pw = password("pw1");
        let first = pw.hash().unwrap();
        let second = pw.hash().unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify(&pw));
        assert!(second.verify(&pw));
    }

    #[test]
    fn test_hash_uses_fixed_cost() {
        let hashed = password("pw1").hash().unwrap();
        assert!(hashed.as_str().starts_with("$2b$10$"));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        let corrupt = HashedPassword::from_stored("not_a_bcrypt_hash");
        assert!(!corrupt.verify(&password("anything")));

        let empty = HashedPassword::from_stored("");
        assert!(!empty.verify(&password("anything")));
    }

    #[test]
    fn test_stored_roundtrip() {
        let pw = password("s3cret");
        let stored = pw.hash().unwrap().as_str().to_string();
        assert!(HashedPassword::from_stored(stored).verify(&pw));
    }

    #[test]
    fn test_debug_redaction() {
        let pw = password("secret");
        let debug_output = format!("{:?}", pw);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
