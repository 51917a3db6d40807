//! Session Tokens
//!
//! Self-contained, signed credentials (HS256 JWT). Nothing is stored
//! server-side: a token is valid exactly when its signature checks out
//! against the process secret and the current time is before `exp`.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed lifetime of an issued token; there is no refresh
pub const TOKEN_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Wire claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user id
    pub sub: String,
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// Identity carried by a token that passed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Token issued at login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Structural defect, bad signature or expiry; deliberately not split
    #[error("Invalid session token")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies session tokens with one process-wide secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, TOKEN_TTL)
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, user_id: UserId, username: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, username, Utc::now())
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    fn issue_at(
        &self,
        user_id: UserId,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let iat = now.timestamp();
        let exp = iat.saturating_add(self.ttl.as_secs() as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)?;

        Ok(IssuedToken {
            token,
            expires_at: unix_to_utc(exp)?,
        })
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            TokenError::Invalid
        })?;
        let claims = data.claims;

        // The library treats `exp == now` as still valid; the contract is `now < exp`.
        if now.timestamp() >= claims.exp {
            tracing::debug!(exp = claims.exp, "Session token expired");
            return Err(TokenError::Invalid);
        }

        let user_id = claims.sub.parse::<UserId>().map_err(|_| TokenError::Invalid)?;

        Ok(SessionClaims {
            user_id,
            username: claims.username,
            issued_at: unix_to_utc(claims.iat)?,
            expires_at: unix_to_utc(claims.exp)?,
        })
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

fn unix_to_utc(secs: i64) -> Result<DateTime<Utc>, TokenError> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or(TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    const SECRET: &[u8] = b"test-signing-secret";

    #[test]
    fn test_issue_then_verify() {
        let service = TokenService::new(SECRET);
        let user_id = UserId::new();

        let issued = service.issue(user_id, "alice").unwrap();
        let claims = service.verify(&issued.token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.expires_at, issued.expires_at);
        assert_eq!(
            (claims.expires_at - claims.issued_at).num_seconds(),
            TOKEN_TTL.as_secs() as i64
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::new(SECRET);
        let three_hours_ago = Utc::now() - ChronoDuration::hours(3);

        let issued = service
            .issue_at(UserId::new(), "alice", three_hours_ago)
            .unwrap();

        assert!(matches!(
            service.verify(&issued.token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_token_invalid_at_exact_expiry() {
        let service = TokenService::new(SECRET);
        let now = Utc::now();
        let issued = service.issue_at(UserId::new(), "alice", now).unwrap();

        let just_before = issued.expires_at - ChronoDuration::seconds(1);
        assert!(service.verify_at(&issued.token, just_before).is_ok());
        assert!(service.verify_at(&issued.token, issued.expires_at).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenService::new(SECRET);
        let other = TokenService::new(b"some-other-secret");

        let issued = issuer.issue(UserId::new(), "alice").unwrap();
        assert!(matches!(other.verify(&issued.token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

        let service = TokenService::new(SECRET);
        let issued = service.issue(UserId::new(), "alice").unwrap();

        let forged_payload = URL_SAFE_NO_PAD.encode(
            br#"{"sub":"00000000-0000-0000-0000-000000000000","username":"mallory","iat":0,"exp":99999999999}"#,
        );
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        parts[1] = &forged_payload;
        let forged = parts.join(".");

        assert!(matches!(service.verify(&forged), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let service = TokenService::new(SECRET);
        for token in ["", "invalid.token.here", "a.b", "not-a-jwt-at-all"] {
            assert!(matches!(service.verify(token), Err(TokenError::Invalid)));
        }
    }

    #[test]
    fn test_debug_hides_secret() {
        let service = TokenService::new(SECRET);
        let debug = format!("{:?}", service);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("test-signing-secret"));
    }
}
