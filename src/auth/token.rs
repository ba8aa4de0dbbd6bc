//! Signed bearer tokens (HS256 JWT).
//!
//! Tokens carry the user id and a fixed expiry. There is no revocation or
//! refresh. Expiry is checked against the caller's clock rather than the
//! system clock so it follows the same `Clock` as the rest of a request.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of an issued token.
pub const TOKEN_TTL_DAYS: i64 = 30;

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn new(user_id: i64, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// The user id, if `sub` is numeric.
    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Issues and verifies tokens with one shared secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Issuer with the standard 30-day lifetime.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::days(TOKEN_TTL_DAYS))
    }

    #[must_use]
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify` against the supplied clock.
        validation.validate_exp = false;
        validation.required_spec_claims = ["exp", "sub"].into_iter().map(String::from).collect();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Sign a token for `user_id`, valid from `now` for the issuer's ttl.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue(&self, user_id: i64, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims::new(user_id, now, self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| Error::Other(format!("token signing failed: {e}")))
    }

    /// Verify a token and return the user id it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the signature, algorithm or claims are
    /// invalid, or if the token expired before `now`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<i64> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                invalid_token()
            })?;

        if claims.is_expired_at(now) {
            tracing::debug!(sub = %claims.sub, exp = claims.exp, "Expired bearer token");
            return Err(invalid_token());
        }

        claims.user_id().ok_or_else(invalid_token)
    }
}

fn invalid_token() -> Error {
    Error::Unauthorized("Invalid or expired token".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(b"test-secret");
        let token = issuer.issue(42, at(2026, 1, 1)).unwrap();

        assert_eq!(issuer.verify(&token, at(2026, 1, 15)).unwrap(), 42);
    }

    #[test]
    fn test_token_expires_after_thirty_days() {
        let issuer = TokenIssuer::new(b"test-secret");
        let token = issuer.issue(7, at(2026, 1, 1)).unwrap();

        assert!(issuer.verify(&token, at(2026, 1, 30)).is_ok());
        let err = issuer.verify(&token, at(2026, 1, 31)).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenIssuer::new(b"secret-a").issue(1, at(2026, 1, 1)).unwrap();
        let err = TokenIssuer::new(b"secret-b")
            .verify(&token, at(2026, 1, 2))
            .unwrap_err();
        assert_eq!(err.http_status(), 401);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = TokenIssuer::new(b"test-secret");
        let genuine = issuer.issue(1, at(2026, 1, 1)).unwrap();
        let other = TokenIssuer::new(b"other-secret").issue(2, at(2026, 1, 1)).unwrap();

        // Payload claiming user 2 under user 1's signature.
        let genuine_parts: Vec<&str> = genuine.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let spliced = [genuine_parts[0], other_parts[1], genuine_parts[2]].join(".");

        assert!(issuer.verify(&spliced, at(2026, 1, 2)).is_err());
        assert!(issuer.verify("not.a.token", at(2026, 1, 2)).is_err());
        assert!(issuer.verify("", at(2026, 1, 2)).is_err());
    }
}
